//! # Configuration Domains
//!
//! Defines the `ConfigDomain` enum naming every family of game
//! configuration that ships with a JSON Schema. The enum is the single
//! place that ties a domain to its schema file, its config file, the
//! schema title it must declare, and the definitions it must carry.
//!
//! Most domains ship one config file. Descriptor-style domains spread
//! their pools across several files, and the dialogue domain ships one
//! file per NPC. `config_files` lists them all.
//!
//! Every `match` on `ConfigDomain` is exhaustive, so adding a domain
//! forces the schema registry, the CLI, and the tests to handle it.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::RnrError;

/// Game configuration domains validated by a Draft-07 schema.
///
/// | Domain | Config file | Schema title |
/// |--------|-------------|--------------|
/// | Stances | `stances.json` | Combat Stance Configuration Schema |
/// | Quests | `quests.json` | Quest Configuration |
/// | Vendors | `vendors.json` | Vendor Configuration |
/// | Terrain | `terrain.json` | Terrain Configuration |
/// | RoomTypes | `room-types.json` | Room Type Configuration |
/// | Resources | `resources.json` | Resource Configuration |
/// | MusicThemes | `music-themes.json` | Music Theme Configuration |
/// | InteractiveObjects | `interactive-objects.json` | Interactive Object Configuration |
/// | StressSources | `stress-sources.json` | Stress Sources Configuration |
/// | Biomes | `biomes.json` | Biome Configuration |
/// | SoundEffects | `sound-effects.json` | Sound Effects Configuration |
/// | Commands | `commands.json` | Command Configuration Schema |
/// | Codex | `codex.json` | Codex Configuration Schema |
/// | Descriptors | `descriptors/*.json` | Descriptor Configuration |
/// | PsychologicalDescriptors | `psychological-descriptors/*.json` | Psychological Descriptor Configuration |
/// | EnvironmentDescriptors | `descriptors/*.json` | Environment Descriptor Configuration Schema |
/// | DiceMechanics | `dice-mechanics.json` | Dice Mechanics Configuration |
/// | CombatDescriptors | `descriptors/*.json` | Combat Descriptor Configuration Schema |
/// | CaptureTemplates | `capture-templates/*.json` | Capture Template Collection |
/// | CorruptionSources | `corruption-sources.json` | Corruption Sources Configuration |
/// | NpcDescriptors | `npc-descriptors/*.json` | NPC Descriptor Configuration |
/// | Dialogue | `dialogues/*_dialogues.json` | Dialogue Tree Configuration |
/// | AbilityDescriptors | `ability-descriptors/*.json` | Ability Descriptor Configuration |
/// | Factions | `factions.json` | Faction Configuration |
/// | DiceTypes | `dice-types.json` | Dice Types Configuration Schema |
/// | Glossary | `glossary.json` | Glossary Configuration Schema |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigDomain {
    /// Combat stances and switching rules.
    Stances,
    /// Quest chains, stages, objectives, and rewards.
    Quests,
    /// Merchant inventories and pricing.
    Vendors,
    /// Terrain types, cover, and hazards.
    Terrain,
    /// Dungeon room archetypes.
    RoomTypes,
    /// Character resource pools (stamina, aether, ...).
    Resources,
    /// Adaptive music themes and stingers.
    MusicThemes,
    /// Chests, doors, levers, traps.
    InteractiveObjects,
    /// Psychic stress sources and recovery.
    StressSources,
    /// World biomes and their spawn tables.
    Biomes,
    /// Sound effect categories and playback settings.
    SoundEffects,
    /// Player commands, aliases, and help text.
    Commands,
    /// Codex categories, entries, and unlock conditions.
    Codex,
    /// Generic weighted flavor-text pools.
    Descriptors,
    /// Stress, trauma, corruption, and recovery flavor text.
    PsychologicalDescriptors,
    /// Environmental, weather, and ambient flavor text.
    EnvironmentDescriptors,
    /// Critical thresholds, advantage, exploding and keep rules.
    DiceMechanics,
    /// Hit and death narration.
    CombatDescriptors,
    /// Field-guide capture templates.
    CaptureTemplates,
    /// Corruption sources, thresholds, and penalties.
    CorruptionSources,
    /// NPC looks, barks, and reactions.
    NpcDescriptors,
    /// Per-NPC dialogue trees.
    Dialogue,
    /// Galdr casting, miscast, and weapon-art narration.
    AbilityDescriptors,
    /// Factions, reputation bands, and perks.
    Factions,
    /// Die types and dice expression syntax.
    DiceTypes,
    /// Glossary terms and display rules.
    Glossary,
}

/// Total number of configuration domains.
pub const CONFIG_DOMAIN_COUNT: usize = 26;

impl ConfigDomain {
    /// Returns all configuration domains in declaration order.
    pub fn all_domains() -> &'static [ConfigDomain] {
        &[
            Self::Stances,
            Self::Quests,
            Self::Vendors,
            Self::Terrain,
            Self::RoomTypes,
            Self::Resources,
            Self::MusicThemes,
            Self::InteractiveObjects,
            Self::StressSources,
            Self::Biomes,
            Self::SoundEffects,
            Self::Commands,
            Self::Codex,
            Self::Descriptors,
            Self::PsychologicalDescriptors,
            Self::EnvironmentDescriptors,
            Self::DiceMechanics,
            Self::CombatDescriptors,
            Self::CaptureTemplates,
            Self::CorruptionSources,
            Self::NpcDescriptors,
            Self::Dialogue,
            Self::AbilityDescriptors,
            Self::Factions,
            Self::DiceTypes,
            Self::Glossary,
        ]
    }

    /// Returns the kebab-case name used in file names and on the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stances => "stances",
            Self::Quests => "quests",
            Self::Vendors => "vendors",
            Self::Terrain => "terrain",
            Self::RoomTypes => "room-types",
            Self::Resources => "resources",
            Self::MusicThemes => "music-themes",
            Self::InteractiveObjects => "interactive-objects",
            Self::StressSources => "stress-sources",
            Self::Biomes => "biomes",
            Self::SoundEffects => "sound-effects",
            Self::Commands => "commands",
            Self::Codex => "codex",
            Self::Descriptors => "descriptors",
            Self::PsychologicalDescriptors => "psychological-descriptors",
            Self::EnvironmentDescriptors => "environment-descriptors",
            Self::DiceMechanics => "dice-mechanics",
            Self::CombatDescriptors => "combat-descriptors",
            Self::CaptureTemplates => "capture-templates",
            Self::CorruptionSources => "corruption-sources",
            Self::NpcDescriptors => "npc-descriptors",
            Self::Dialogue => "dialogue",
            Self::AbilityDescriptors => "ability-descriptors",
            Self::Factions => "factions",
            Self::DiceTypes => "dice-types",
            Self::Glossary => "glossary",
        }
    }

    /// Schema file name under `schemas/`, e.g. `"stances.schema.json"`.
    pub fn schema_file_name(&self) -> String {
        format!("{}.schema.json", self.as_str())
    }

    /// Config files under `config/`, relative to it.
    ///
    /// Descriptor files under `config/descriptors/` are shared: the combat
    /// and environment schemas are stricter readings of the same pools.
    pub fn config_files(&self) -> &'static [&'static str] {
        match self {
            Self::Stances => &["stances.json"],
            Self::Quests => &["quests.json"],
            Self::Vendors => &["vendors.json"],
            Self::Terrain => &["terrain.json"],
            Self::RoomTypes => &["room-types.json"],
            Self::Resources => &["resources.json"],
            Self::MusicThemes => &["music-themes.json"],
            Self::InteractiveObjects => &["interactive-objects.json"],
            Self::StressSources => &["stress-sources.json"],
            Self::Biomes => &["biomes.json"],
            Self::SoundEffects => &["sound-effects.json"],
            Self::Commands => &["commands.json"],
            Self::Codex => &["codex.json"],
            Self::Descriptors => &["descriptors/combat-hits.json", "descriptors/environmental.json"],
            Self::PsychologicalDescriptors => &[
                "psychological-descriptors/stress-descriptors.json",
                "psychological-descriptors/trauma-descriptors.json",
                "psychological-descriptors/corruption-descriptors.json",
                "psychological-descriptors/biome-pressure-descriptors.json",
                "psychological-descriptors/recovery-descriptors.json",
            ],
            Self::EnvironmentDescriptors => &[
                "descriptors/environmental.json",
                "descriptors/weather.json",
                "descriptors/ambient-events.json",
            ],
            Self::DiceMechanics => &["dice-mechanics.json"],
            Self::CombatDescriptors => &["descriptors/combat-hits.json", "descriptors/combat-deaths.json"],
            Self::CaptureTemplates => &[
                "capture-templates/rusted-servitor.json",
                "capture-templates/blighted-creature.json",
                "capture-templates/ancient-ruin.json",
                "capture-templates/industrial-site.json",
                "capture-templates/generic-container.json",
                "capture-templates/field-guide-triggers.json",
            ],
            Self::CorruptionSources => &["corruption-sources.json"],
            Self::NpcDescriptors => &[
                "npc-descriptors/physical-descriptors.json",
                "npc-descriptors/ambient-barks.json",
                "npc-descriptors/reaction-descriptors.json",
            ],
            Self::Dialogue => &[
                "dialogues/bjorn_dialogues.json",
                "dialogues/sigrun_dialogues.json",
                "dialogues/astrid_dialogues.json",
                "dialogues/eydis_dialogues.json",
                "dialogues/gunnar_dialogues.json",
                "dialogues/kjartan_dialogues.json",
                "dialogues/rolf_dialogues.json",
                "dialogues/thorvald_dialogues.json",
            ],
            Self::AbilityDescriptors => &[
                "ability-descriptors/galdr-actions.json",
                "ability-descriptors/galdr-miscasts.json",
                "ability-descriptors/galdr-outcomes.json",
                "ability-descriptors/weapon-arts.json",
            ],
            Self::Factions => &["factions.json"],
            Self::DiceTypes => &["dice-types.json"],
            Self::Glossary => &["glossary.json"],
        }
    }

    /// The primary config file under `config/`, e.g. `"stances.json"`.
    pub fn config_file_name(&self) -> &'static str {
        self.config_files()[0]
    }

    /// Directory under `config/` that belongs to this domain alone.
    ///
    /// Any JSON or YAML file placed there is read with this domain's schema.
    pub fn config_dir(&self) -> Option<&'static str> {
        match self {
            Self::PsychologicalDescriptors => Some("psychological-descriptors"),
            Self::CaptureTemplates => Some("capture-templates"),
            Self::NpcDescriptors => Some("npc-descriptors"),
            Self::Dialogue => Some("dialogues"),
            Self::AbilityDescriptors => Some("ability-descriptors"),
            _ => None,
        }
    }

    /// JSON type of a config document's root: `"array"` for dialogue trees,
    /// `"object"` for everything else.
    pub fn root_type(&self) -> &'static str {
        match self {
            Self::Dialogue => "array",
            _ => "object",
        }
    }

    /// The `title` the domain's schema must declare.
    pub fn schema_title(&self) -> &'static str {
        match self {
            Self::Stances => "Combat Stance Configuration Schema",
            Self::Quests => "Quest Configuration",
            Self::Vendors => "Vendor Configuration",
            Self::Terrain => "Terrain Configuration",
            Self::RoomTypes => "Room Type Configuration",
            Self::Resources => "Resource Configuration",
            Self::MusicThemes => "Music Theme Configuration",
            Self::InteractiveObjects => "Interactive Object Configuration",
            Self::StressSources => "Stress Sources Configuration",
            Self::Biomes => "Biome Configuration",
            Self::SoundEffects => "Sound Effects Configuration",
            Self::Commands => "Command Configuration Schema",
            Self::Codex => "Codex Configuration Schema",
            Self::Descriptors => "Descriptor Configuration",
            Self::PsychologicalDescriptors => "Psychological Descriptor Configuration",
            Self::EnvironmentDescriptors => "Environment Descriptor Configuration Schema",
            Self::DiceMechanics => "Dice Mechanics Configuration",
            Self::CombatDescriptors => "Combat Descriptor Configuration Schema",
            Self::CaptureTemplates => "Capture Template Collection",
            Self::CorruptionSources => "Corruption Sources Configuration",
            Self::NpcDescriptors => "NPC Descriptor Configuration",
            Self::Dialogue => "Dialogue Tree Configuration",
            Self::AbilityDescriptors => "Ability Descriptor Configuration",
            Self::Factions => "Faction Configuration",
            Self::DiceTypes => "Dice Types Configuration Schema",
            Self::Glossary => "Glossary Configuration Schema",
        }
    }

    /// Names under `definitions` that the domain's schema must carry.
    pub fn required_definitions(&self) -> &'static [&'static str] {
        match self {
            Self::Stances => &[
                "CombatStance",
                "StatModifier",
                "AbilityRestriction",
                "SwitchingRule",
                "SwitchCondition",
                "TriggerEffect",
                "AIBehavior",
                "AICondition",
                "UnlockCondition",
            ],
            Self::Quests => &[
                "Quest",
                "QuestStage",
                "Objective",
                "ObjectiveCondition",
                "Prerequisite",
                "Reward",
                "QuestBranch",
                "BranchCondition",
                "FailureCondition",
                "Consequence",
                "StageAction",
                "QuestGiver",
            ],
            Self::Vendors => &[
                "VendorDefinition",
                "InventoryItem",
                "PriceModifiers",
                "RestockRule",
                "OperatingHours",
            ],
            Self::Terrain => &["TerrainDefinition", "HazardEffect", "SavingThrow"],
            Self::RoomTypes => &[
                "RoomTypeDefinition",
                "ConnectionRules",
                "FeatureSpawnRule",
                "SpawnConditions",
            ],
            Self::Resources => &[
                "ResourceDefinition",
                "MaxCalculation",
                "AttributeScaling",
                "DepletionEffect",
            ],
            Self::MusicThemes => &[
                "ThemeDefinition",
                "IntensityLayer",
                "LoopPoints",
                "Stinger",
                "Transitions",
            ],
            Self::InteractiveObjects => &[
                "InteractiveObjectDefinition",
                "SkillCheck",
                "StateTransition",
                "Reward",
                "ItemReward",
                "QuantityRange",
                "TrapEffect",
                "SavingThrow",
            ],
            Self::StressSources => &["StressSourceDefinition", "RecoveryRate"],
            Self::Biomes => &[
                "BiomeDefinition",
                "DefaultCategories",
                "SpawnTable",
                "SpawnEntry",
                "TerrainDistribution",
                "TerrainEntry",
                "HazardFrequency",
            ],
            Self::SoundEffects => &[
                "SoundCategory",
                "SoundEffect",
                "VolumeRange",
                "PitchRange",
                "GlobalSettings",
            ],
            Self::Commands => &[
                "CommandCategory",
                "CommandCategoryDefinition",
                "ArgumentType",
                "CommandContext",
                "Command",
                "CommandArgument",
                "CommandHelp",
                "CommandExample",
            ],
            Self::Codex => &[
                "CodexCategory",
                "CodexSubcategory",
                "CodexEntry",
                "EntrySection",
                "UnlockCondition",
                "EntryRelation",
                "ProgressionLevel",
                "ProgressionReward",
                "ProgressionDefaults",
            ],
            Self::Descriptors => &["DescriptorPool", "Descriptor", "VariablePattern"],
            Self::PsychologicalDescriptors => &[
                "StressDescriptor",
                "TraumaDescriptor",
                "CorruptionDescriptor",
                "BiomePressureDescriptor",
                "RecoveryDescriptor",
                "StressThreshold",
                "TraumaType",
                "CorruptionThreshold",
                "Biome",
                "RecoveryType",
                "Intensity",
            ],
            Self::EnvironmentDescriptors => &[
                "EnvironmentCategory",
                "SensoryCategory",
                "WeatherPoolTypes",
                "AmbientPoolTypes",
                "EnvironmentDescriptorPool",
                "EnvironmentDescriptor",
                "TimeOfDayValue",
                "SeasonValue",
                "VariablePattern",
            ],
            Self::DiceMechanics => &[
                "CriticalThresholds",
                "AdvantageRules",
                "ExplodingDiceRules",
                "KeepRules",
                "RerollRules",
                "DefaultDice",
                "DifficultyClass",
            ],
            Self::CombatDescriptors => &[
                "CombatCategory",
                "HitPoolTypes",
                "DeathPoolTypes",
                "CombatDescriptorPool",
                "CombatDescriptor",
                "VariablePattern",
            ],
            Self::CaptureTemplates => &["CaptureTemplate", "CaptureType"],
            Self::CorruptionSources => &[
                "CorruptionSourceDefinition",
                "ThresholdEffect",
                "PenaltyFormula",
            ],
            Self::NpcDescriptors => &[
                "NPCPhysicalDescriptor",
                "NPCAmbientBarkDescriptor",
                "NPCReactionDescriptor",
                "NPCArchetype",
                "NPCCondition",
                "Disposition",
                "BarkType",
                "ReactionType",
                "TriggerEvent",
            ],
            Self::Dialogue => &[
                "DialogueNode",
                "DialogueOption",
                "SkillCheck",
                "Outcome",
                "Condition",
            ],
            Self::AbilityDescriptors => &[
                "GaldrActionDescriptor",
                "GaldrManifestationDescriptor",
                "GaldrOutcomeDescriptor",
                "GaldrMiscastDescriptor",
                "WeaponArtDescriptor",
                "SkillUsageDescriptor",
                "RuneSchool",
                "SuccessLevel",
            ],
            Self::Factions => &[
                "Faction",
                "ReputationThresholds",
                "ThresholdRange",
                "FactionRelationship",
                "ReputationModifier",
                "ModifierCondition",
                "FactionPerk",
                "VendorAccess",
            ],
            Self::DiceTypes => &["DieType", "DiceExpression", "DiceExpressionPattern"],
            Self::Glossary => &[
                "TermCategory",
                "GlossaryTerm",
                "CrossReference",
                "CrossReferenceType",
                "DisplayContext",
                "DisplayRule",
            ],
        }
    }

    /// Infer the domain from a config file path such as `config/room-types.json`.
    ///
    /// Returns the first of [`ConfigDomain::domains_for_path`].
    pub fn from_config_path(path: &Path) -> Option<Self> {
        Self::domains_for_path(path).into_iter().next()
    }

    /// Every domain whose schema governs the file at `path`.
    ///
    /// A path matches when it ends with one of the domain's `config_files`
    /// (comparing components, with `.yaml`/`.yml` read as `.json`), or when
    /// it sits directly in a directory the domain owns. Shared descriptor
    /// files match more than one domain. Returns an empty list for other
    /// extensions and for `*.schema.json`.
    pub fn domains_for_path(path: &Path) -> Vec<Self> {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return Vec::new();
        };
        if !matches!(ext, "json" | "yaml" | "yml") {
            return Vec::new();
        }
        let is_schema = path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.ends_with(".schema"));
        if is_schema {
            return Vec::new();
        }

        let as_json = path.with_extension("json");
        let by_file: Vec<Self> = Self::all_domains()
            .iter()
            .copied()
            .filter(|d| d.config_files().iter().any(|f| as_json.ends_with(f)))
            .collect();
        if !by_file.is_empty() {
            return by_file;
        }

        let parent = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str());
        Self::all_domains()
            .iter()
            .copied()
            .filter(|d| d.config_dir().is_some() && d.config_dir() == parent)
            .collect()
    }
}

impl std::fmt::Display for ConfigDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigDomain {
    type Err = RnrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all_domains()
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| RnrError::UnknownDomain(s.to_string()))
    }
}
