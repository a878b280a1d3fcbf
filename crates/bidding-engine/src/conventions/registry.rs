use super::{
    Blackwood, Convention, ConventionId, ConventionLevel, ConventionMetadata, FourthSuitForcing,
    Jacoby2Nt, JacobyTransfer, Michaels, NegativeDouble, Preempt, Splinter, Stayman,
    TakeoutDouble, Unusual2Nt,
};

/// Indexed by `ConventionId as usize`.
pub static METADATA: [ConventionMetadata; 11] = [
    ConventionMetadata {
        id: ConventionId::Blackwood,
        name: "Blackwood",
        level: ConventionLevel::Essential,
        priority: 100,
        category: "slam",
        prerequisites: &[],
        applicability: "blackwood::is_applicable",
    },
    ConventionMetadata {
        id: ConventionId::JacobyTransfer,
        name: "Jacoby Transfer",
        level: ConventionLevel::Essential,
        priority: 90,
        category: "notrump",
        prerequisites: &[],
        applicability: "jacoby_transfer::is_applicable",
    },
    ConventionMetadata {
        id: ConventionId::Stayman,
        name: "Stayman",
        level: ConventionLevel::Essential,
        priority: 85,
        category: "notrump",
        prerequisites: &[],
        applicability: "stayman::is_applicable",
    },
    ConventionMetadata {
        id: ConventionId::Splinter,
        name: "Splinter",
        level: ConventionLevel::Advanced,
        priority: 80,
        category: "major_raise",
        prerequisites: &[ConventionId::Blackwood],
        applicability: "splinter::is_applicable",
    },
    ConventionMetadata {
        id: ConventionId::Jacoby2Nt,
        name: "Jacoby 2NT",
        level: ConventionLevel::Intermediate,
        priority: 75,
        category: "major_raise",
        prerequisites: &[ConventionId::Blackwood],
        applicability: "jacoby_2nt::is_applicable",
    },
    ConventionMetadata {
        id: ConventionId::FourthSuitForcing,
        name: "Fourth Suit Forcing",
        level: ConventionLevel::Advanced,
        priority: 70,
        category: "constructive",
        prerequisites: &[],
        applicability: "fourth_suit::is_applicable",
    },
    ConventionMetadata {
        id: ConventionId::NegativeDouble,
        name: "Negative Double",
        level: ConventionLevel::Intermediate,
        priority: 60,
        category: "competitive",
        prerequisites: &[],
        applicability: "negative_double::is_applicable",
    },
    ConventionMetadata {
        id: ConventionId::Michaels,
        name: "Michaels Cuebid",
        level: ConventionLevel::Intermediate,
        priority: 55,
        category: "competitive",
        prerequisites: &[],
        applicability: "michaels::is_applicable",
    },
    ConventionMetadata {
        id: ConventionId::Unusual2Nt,
        name: "Unusual 2NT",
        level: ConventionLevel::Intermediate,
        priority: 54,
        category: "competitive",
        prerequisites: &[],
        applicability: "unusual_2nt::is_applicable",
    },
    ConventionMetadata {
        id: ConventionId::TakeoutDouble,
        name: "Takeout Double",
        level: ConventionLevel::Essential,
        priority: 50,
        category: "competitive",
        prerequisites: &[],
        applicability: "takeout_double::is_applicable",
    },
    ConventionMetadata {
        id: ConventionId::Preempt,
        name: "Preempt",
        level: ConventionLevel::Essential,
        priority: 40,
        category: "opening",
        prerequisites: &[],
        applicability: "preempt::is_applicable",
    },
];

static REGISTRY: [&dyn Convention; 11] = [
    &Blackwood,
    &JacobyTransfer,
    &Stayman,
    &Splinter,
    &Jacoby2Nt,
    &FourthSuitForcing,
    &NegativeDouble,
    &Michaels,
    &Unusual2Nt,
    &TakeoutDouble,
    &Preempt,
];

/// All conventions, highest priority first.
pub fn registry() -> &'static [&'static dyn Convention] {
    &REGISTRY
}
