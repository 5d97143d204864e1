//! Raid zone table for the parses endpoint.

/// One queryable raid tier.
#[derive(Debug, Clone, Copy)]
pub struct RaidZone {
    pub id: u32,
    pub name: &'static str,
}

/// Every tier merged into a verification score. The order is fixed so
/// the first-wins encounter dedup stays deterministic.
pub const RAID_ZONES: &[RaidZone] = &[
    RaidZone { id: 1036, name: "Naxxramas" },
    RaidZone { id: 1035, name: "Temple of Ahn'Qiraj" },
    RaidZone { id: 1034, name: "Blackwing Lair" },
    RaidZone { id: 1028, name: "Molten Core" },
];
