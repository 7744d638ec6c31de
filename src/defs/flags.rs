use bitflags::bitflags;

bitflags! {
    /// Behaviour / collision flags carried by every dynamic entity.
    ///
    /// Numeric values match the vanilla `MF_*` constants; only the bits
    /// this subsystem actually consults are kept.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct MobjFlags: u32 {
        // Call the pickup path when touched.
        const SPECIAL    = 0x0000_0001;
        // Blocks movement.
        const SOLID      = 0x0000_0002;
        // Can be hit (and therefore crushed) by moving geometry.
        const SHOOTABLE  = 0x0000_0004;
        // Never registered in the blockmap, invisible to broad phase.
        const NOBLOCKMAP = 0x0000_0010;
        const NOGRAVITY  = 0x0000_0200;
        const NOCLIP     = 0x0000_1000;
        const MISSILE    = 0x0001_0000;
        const CORPSE     = 0x0010_0000;
    }
}
