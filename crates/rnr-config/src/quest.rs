//! # Quests
//!
//! Typed view of `config/quests.json`. A quest is a graph of stages: each
//! stage names the stage that follows (`nextStageId`, `null` to finish), and
//! the quest's branches jump to another stage when a condition holds.
//!
//! Reference checks cover what the schema cannot see: stage targets that do
//! not exist, `ObjectiveComplete` branches naming an objective the quest
//! lacks, prerequisites on unknown quests, stages no path reaches, and
//! `nextStageId` chains that loop.

use std::collections::HashSet;

use rnr_core::{ConfigDomain, ContentId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::provider::DomainConfig;
use crate::references::{duplicate_ids, ReferenceIssue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestCategory {
    MainStory,
    SideQuest,
    FactionQuest,
    Bounty,
    Exploration,
    Crafting,
    Daily,
    Event,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveKind {
    Kill,
    Collect,
    Talk,
    Explore,
    Escort,
    Defend,
    Craft,
    Discover,
    Deliver,
    Use,
    Survive,
    Reach,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveConditionKind {
    InArea,
    TimeOfDay,
    WithoutDetection,
    WithItem,
    HasCompanion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveCondition {
    #[serde(rename = "type")]
    pub kind: ObjectiveConditionKind,
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub id: ContentId,
    #[serde(rename = "type")]
    pub kind: ObjectiveKind,
    pub description: String,
    #[serde(default)]
    pub target_id: Option<String>,
    #[serde(default = "default_required_count")]
    pub required_count: u32,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub conditions: Vec<ObjectiveCondition>,
}

fn default_required_count() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrerequisiteKind {
    Level,
    QuestComplete,
    QuestActive,
    Reputation,
    Item,
    Flag,
    Attribute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Has,
    NotHas,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prerequisite {
    #[serde(rename = "type")]
    pub kind: PrerequisiteKind,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub operator: Option<Operator>,
}

impl Prerequisite {
    /// The quest a `QuestComplete`/`QuestActive` prerequisite names, with the
    /// field it was read from. `target` wins over a string `value`.
    pub fn quest_reference(&self) -> Option<(&'static str, Option<&str>)> {
        if !matches!(
            self.kind,
            PrerequisiteKind::QuestComplete | PrerequisiteKind::QuestActive
        ) {
            return None;
        }
        match (&self.target, &self.value) {
            (Some(target), _) => Some(("target", Some(target.as_str()))),
            (None, value) => Some(("value", value.as_ref().and_then(Value::as_str))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardKind {
    Experience,
    Gold,
    Item,
    Reputation,
    Ability,
    Title,
    Unlock,
    Flag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    #[serde(rename = "type")]
    pub kind: RewardKind,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BranchConditionKind {
    ObjectiveComplete,
    ChoiceMade,
    FlagSet,
    ItemPossessed,
    ReputationAbove,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchCondition {
    #[serde(rename = "type")]
    pub kind: BranchConditionKind,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestBranch {
    pub id: ContentId,
    pub condition: BranchCondition,
    pub target_stage_id: ContentId,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsequenceKind {
    SetFlag,
    ClearFlag,
    ModifyReputation,
    SpawnNpc,
    RemoveNpc,
    GiveItem,
    TakeItem,
    StartQuest,
    FailQuest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consequence {
    #[serde(rename = "type")]
    pub kind: ConsequenceKind,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageActionKind {
    ShowMessage,
    PlayDialogue,
    SpawnEnemies,
    GiveItem,
    SetFlag,
    TeleportPlayer,
    PlaySound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageAction {
    #[serde(rename = "type")]
    pub kind: StageActionKind,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub consequences: Vec<Consequence>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    #[serde(rename = "NPCDeath")]
    NpcDeath,
    TimeExpired,
    ItemLost,
    AreaLeft,
    FlagSet,
    PlayerDeath,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureCondition {
    #[serde(rename = "type")]
    pub kind: FailureKind,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub consequences: Vec<Consequence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestGiver {
    pub npc_id: ContentId,
    #[serde(default)]
    pub dialogue_node_id: Option<String>,
    #[serde(default)]
    pub turn_in_npc_id: Option<ContentId>,
    #[serde(default)]
    pub turn_in_dialogue_node_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestStage {
    pub id: ContentId,
    pub name: String,
    pub description: String,
    pub objectives: Vec<Objective>,
    /// `None` (absent or `null`) ends the quest.
    #[serde(default)]
    pub next_stage_id: Option<ContentId>,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub on_start: Vec<StageAction>,
    #[serde(default)]
    pub on_complete: Vec<StageAction>,
    #[serde(default)]
    pub rewards: Vec<Reward>,
}

impl QuestStage {
    /// True when this stage ends the quest.
    pub fn is_final(&self) -> bool {
        self.next_stage_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: ContentId,
    pub name: String,
    pub description: String,
    pub category: QuestCategory,
    #[serde(default)]
    pub recommended_level: Option<u32>,
    #[serde(default)]
    pub is_repeatable: bool,
    /// Turn limit; 0 or absent means none.
    #[serde(default)]
    pub time_limit: Option<u32>,
    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,
    pub stages: Vec<QuestStage>,
    #[serde(default)]
    pub branches: Vec<QuestBranch>,
    #[serde(default)]
    pub rewards: Vec<Reward>,
    #[serde(default)]
    pub failure_conditions: Vec<FailureCondition>,
    #[serde(default)]
    pub quest_giver: Option<QuestGiver>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Quest {
    /// Look up a stage by id.
    pub fn stage(&self, id: &str) -> Option<&QuestStage> {
        self.stages.iter().find(|s| s.id.as_str() == id)
    }

    /// Every stage `stage` can lead to: its `nextStageId`, then the target of
    /// each quest branch whose condition can hold while in that stage.
    ///
    /// An `ObjectiveComplete` branch applies from the stage owning that
    /// objective; every other branch applies from any stage.
    pub fn successors<'a>(&'a self, stage: &'a QuestStage) -> impl Iterator<Item = &'a ContentId> {
        stage.next_stage_id.iter().chain(
            self.branches
                .iter()
                .filter(move |b| match b.condition.kind {
                    BranchConditionKind::ObjectiveComplete => {
                        let target = b.condition.target.as_deref().unwrap_or("");
                        stage.objectives.iter().any(|o| o.id.as_str() == target)
                    }
                    _ => true,
                })
                .map(|b| &b.target_stage_id),
        )
    }

    /// The stage the quest starts in.
    pub fn first_stage(&self) -> Option<&QuestStage> {
        self.stages.first()
    }

    /// Stages visited by following `nextStageId` from the first stage.
    ///
    /// Stops at the final stage, at an unknown target, or before revisiting
    /// a stage.
    pub fn stage_path(&self) -> Vec<&QuestStage> {
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.first_stage();
        while let Some(stage) = current {
            if !seen.insert(stage.id.as_str()) {
                break;
            }
            path.push(stage);
            current = stage
                .next_stage_id
                .as_ref()
                .and_then(|next| self.stage(next.as_str()));
        }
        path
    }

    /// Ids of quests that must be complete before this one is offered.
    pub fn required_quests(&self) -> impl Iterator<Item = &str> {
        self.prerequisites
            .iter()
            .filter(|p| p.kind == PrerequisiteKind::QuestComplete)
            .filter_map(|p| p.quest_reference().and_then(|(_, id)| id))
    }

    fn has_objective(&self, id: &str) -> bool {
        self.stages
            .iter()
            .flat_map(|s| &s.objectives)
            .any(|o| o.id.as_str() == id)
    }

    fn reference_issues(&self, q: usize, known_quests: &HashSet<&str>) -> Vec<ReferenceIssue> {
        let mut issues = duplicate_ids(self.stages.iter().map(|s| s.id.as_str()), |i| {
            format!("/quests/{q}/stages/{i}/id")
        });
        let stage_ids: HashSet<&str> = self.stages.iter().map(|s| s.id.as_str()).collect();

        for (i, prerequisite) in self.prerequisites.iter().enumerate() {
            let Some((field, quest)) = prerequisite.quest_reference() else {
                continue;
            };
            let at = format!("/quests/{q}/prerequisites/{i}/{field}");
            match quest {
                Some(id) if id == self.id.as_str() => {
                    issues.push(ReferenceIssue::new(at, "quest requires itself"))
                }
                Some(id) if known_quests.contains(id) => {}
                Some(id) => issues.push(ReferenceIssue::new(at, format!("unknown quest {id:?}"))),
                None => issues.push(ReferenceIssue::new(at, "prerequisite names no quest")),
            }
        }

        for (s, stage) in self.stages.iter().enumerate() {
            for (o, objective) in stage.objectives.iter().enumerate() {
                let duplicate = self
                    .stages
                    .iter()
                    .take(s + 1)
                    .flat_map(|st| &st.objectives)
                    .filter(|other| other.id == objective.id)
                    .count()
                    > 1;
                if duplicate {
                    issues.push(ReferenceIssue::new(
                        format!("/quests/{q}/stages/{s}/objectives/{o}/id"),
                        format!("duplicate objective id {:?}", objective.id.as_str()),
                    ));
                }
            }
            if let Some(next) = &stage.next_stage_id {
                if !stage_ids.contains(next.as_str()) {
                    issues.push(ReferenceIssue::new(
                        format!("/quests/{q}/stages/{s}/nextStageId"),
                        format!("unknown stage {:?}", next.as_str()),
                    ));
                }
            }
        }

        issues.extend(duplicate_ids(self.branches.iter().map(|b| b.id.as_str()), |b| {
            format!("/quests/{q}/branches/{b}/id")
        }));
        for (b, branch) in self.branches.iter().enumerate() {
            let at = format!("/quests/{q}/branches/{b}");
            if !stage_ids.contains(branch.target_stage_id.as_str()) {
                issues.push(ReferenceIssue::new(
                    format!("{at}/targetStageId"),
                    format!("unknown stage {:?}", branch.target_stage_id.as_str()),
                ));
            }
            if branch.condition.kind == BranchConditionKind::ObjectiveComplete {
                let target = branch.condition.target.as_deref().unwrap_or("");
                if !self.has_objective(target) {
                    issues.push(ReferenceIssue::new(
                        format!("{at}/condition/target"),
                        format!("unknown objective {target:?}"),
                    ));
                }
            }
        }

        if self.stage_path().last().is_some_and(|s| {
            s.next_stage_id
                .as_ref()
                .is_some_and(|next| stage_ids.contains(next.as_str()))
        }) {
            issues.push(ReferenceIssue::new(
                format!("/quests/{q}/stages"),
                "nextStageId chain loops without reaching a final stage",
            ));
        }

        let reachable = self.reachable_stages();
        for (s, stage) in self.stages.iter().enumerate() {
            if !reachable.contains(stage.id.as_str()) {
                issues.push(ReferenceIssue::new(
                    format!("/quests/{q}/stages/{s}"),
                    format!("stage {:?} is unreachable from the first stage", stage.id.as_str()),
                ));
            }
        }

        issues
    }

    fn reachable_stages(&self) -> HashSet<&str> {
        let mut reachable = HashSet::new();
        let mut pending: Vec<&QuestStage> = self.first_stage().into_iter().collect();
        while let Some(stage) = pending.pop() {
            if !reachable.insert(stage.id.as_str()) {
                continue;
            }
            pending.extend(self.successors(stage).filter_map(|id| self.stage(id.as_str())));
        }
        reachable
    }
}

/// Root of `quests.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestConfiguration {
    pub version: String,
    pub quests: Vec<Quest>,
}

impl QuestConfiguration {
    /// Look up a quest by id.
    pub fn quest(&self, id: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id.as_str() == id)
    }

    /// Quests with no quest prerequisites.
    pub fn starting_quests(&self) -> impl Iterator<Item = &Quest> {
        self.quests
            .iter()
            .filter(|q| q.required_quests().next().is_none())
    }
}

impl DomainConfig for QuestConfiguration {
    const DOMAIN: ConfigDomain = ConfigDomain::Quests;

    fn entry_count(&self) -> usize {
        self.quests.len()
    }

    fn reference_issues(&self) -> Vec<ReferenceIssue> {
        let mut issues = duplicate_ids(self.quests.iter().map(|q| q.id.as_str()), |i| {
            format!("/quests/{i}/id")
        });
        let known: HashSet<&str> = self.quests.iter().map(|q| q.id.as_str()).collect();
        for (q, quest) in self.quests.iter().enumerate() {
            issues.extend(quest.reference_issues(q, &known));
        }
        issues
    }
}
