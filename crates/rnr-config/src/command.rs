//! # Commands
//!
//! Typed view of `config/commands.json` plus the small amount of parsing
//! the command data drives: global alias expansion, verb resolution by name
//! or alias, and stripping of filler words from arguments.

use std::collections::{BTreeMap, HashMap, HashSet};

use rnr_core::{ConfigDomain, ContentId};
use serde::{Deserialize, Serialize};

use crate::provider::DomainConfig;
use crate::references::{duplicate_ids, ReferenceIssue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CommandCategory {
    Movement,
    Combat,
    Interaction,
    Inventory,
    Information,
    Social,
    System,
    Debug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArgumentType {
    String,
    Number,
    Direction,
    Target,
    Item,
    Ability,
    #[serde(rename = "NPC")]
    Npc,
    Location,
    Quantity,
    Boolean,
}

/// Game state a command can be issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandContext {
    Exploration,
    Combat,
    Dialogue,
    Inventory,
    Menu,
    Rest,
    Crafting,
    Trading,
    Any,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDefinition {
    pub id: CommandCategory,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: Option<u32>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandArgument {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ArgumentType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub valid_values: Vec<String>,
    #[serde(default)]
    pub is_variadic: bool,
    #[serde(default)]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandExample {
    pub input: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandHelp {
    pub usage: String,
    #[serde(default)]
    pub examples: Vec<CommandExample>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub see_also: Vec<ContentId>,
}

/// A player command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub id: ContentId,
    /// The verb the player types.
    pub name: String,
    pub category: CommandCategory,
    pub description: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub arguments: Vec<CommandArgument>,
    /// Empty means usable anywhere.
    #[serde(default)]
    pub contexts: Vec<CommandContext>,
    #[serde(default)]
    pub help: Option<CommandHelp>,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub requires_target: bool,
    #[serde(default)]
    pub can_chain: bool,
    #[serde(default)]
    pub cooldown: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Command {
    /// The name followed by every alias.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// True if `word` is the name or an alias, ignoring ASCII case.
    pub fn matches(&self, word: &str) -> bool {
        self.words().any(|w| w.eq_ignore_ascii_case(word))
    }

    /// True if the command may be issued in `context`.
    pub fn available_in(&self, context: CommandContext) -> bool {
        self.contexts.is_empty()
            || self
                .contexts
                .iter()
                .any(|c| *c == CommandContext::Any || *c == context)
    }

    /// Number of arguments the player must supply.
    pub fn required_arguments(&self) -> usize {
        self.arguments.iter().filter(|a| a.is_required).count()
    }
}

/// Player input resolved against the command table.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInput<'a> {
    pub command: &'a Command,
    /// Remaining words, lowercased, with ignored words removed.
    pub arguments: Vec<String>,
}

/// Root of `commands.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandConfiguration {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub categories: Vec<CategoryDefinition>,
    pub commands: Vec<Command>,
    #[serde(default)]
    pub global_aliases: BTreeMap<String, String>,
    #[serde(default)]
    pub ignored_words: Vec<String>,
}

impl CommandConfiguration {
    /// Look up a command by id.
    pub fn command(&self, id: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.id.as_str() == id)
    }

    /// Find the command whose name or alias is `word`, ignoring ASCII case.
    ///
    /// A global alias resolves to the command its expansion starts with.
    pub fn resolve(&self, word: &str) -> Option<&Command> {
        let word = word.trim();
        self.commands.iter().find(|c| c.matches(word)).or_else(|| {
            let verb = self.expand_input(word).split_whitespace().next()?;
            self.commands.iter().find(|c| c.matches(verb))
        })
    }

    /// Expand a global alias when the whole input is one.
    ///
    /// `"n"` becomes `"go north"`; anything else is returned trimmed and
    /// unchanged.
    pub fn expand_input<'a>(&'a self, input: &'a str) -> &'a str {
        let trimmed = input.trim();
        self.global_aliases
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(trimmed))
            .map(|(_, expansion)| expansion.as_str())
            .unwrap_or(trimmed)
    }

    /// Resolve a line of player input.
    ///
    /// The first word is the verb and is never dropped, so an alias that
    /// doubles as an ignored word (`a`) still resolves. Ignored words are
    /// removed from the arguments only.
    pub fn parse(&self, input: &str) -> Option<ParsedInput<'_>> {
        let expanded = self.expand_input(input);
        let mut words = expanded.split_whitespace();
        let command = self.resolve(words.next()?)?;
        let arguments = words
            .map(str::to_lowercase)
            .filter(|w| !self.ignored_words.iter().any(|i| i.eq_ignore_ascii_case(w)))
            .collect();
        Some(ParsedInput { command, arguments })
    }

    /// Visible commands usable in `context`.
    pub fn available_in(&self, context: CommandContext) -> impl Iterator<Item = &Command> {
        self.commands
            .iter()
            .filter(move |c| !c.is_hidden && c.available_in(context))
    }

    /// Commands grouped by category, in the declared category order.
    ///
    /// Categories that are used but not declared sort last.
    pub fn by_category(&self) -> Vec<(CommandCategory, Vec<&Command>)> {
        let order: HashMap<CommandCategory, u32> = self
            .categories
            .iter()
            .map(|c| (c.id, c.sort_order.unwrap_or(u32::MAX)))
            .collect();
        let mut groups: BTreeMap<CommandCategory, Vec<&Command>> = BTreeMap::new();
        for command in &self.commands {
            groups.entry(command.category).or_default().push(command);
        }
        let mut groups: Vec<_> = groups.into_iter().collect();
        groups.sort_by_key(|(category, _)| order.get(category).copied().unwrap_or(u32::MAX));
        groups
    }
}

impl DomainConfig for CommandConfiguration {
    const DOMAIN: ConfigDomain = ConfigDomain::Commands;

    fn entry_count(&self) -> usize {
        self.commands.len()
    }

    fn reference_issues(&self) -> Vec<ReferenceIssue> {
        let mut issues = duplicate_ids(self.commands.iter().map(|c| c.id.as_str()), |i| {
            format!("/commands/{i}/id")
        });

        let mut claimed: HashMap<String, &str> = HashMap::new();
        for (i, command) in self.commands.iter().enumerate() {
            for (j, word) in command.words().enumerate() {
                let location = if j == 0 {
                    format!("/commands/{i}/name")
                } else {
                    format!("/commands/{i}/aliases/{}", j - 1)
                };
                match claimed.get(&word.to_lowercase()) {
                    Some(owner) if *owner != command.id.as_str() => {
                        issues.push(ReferenceIssue::new(
                            location,
                            format!("{word:?} is already used by command {owner:?}"),
                        ));
                    }
                    _ => {
                        claimed.insert(word.to_lowercase(), command.id.as_str());
                    }
                }
            }
        }

        for (alias, expansion) in &self.global_aliases {
            let verb = expansion.split_whitespace().next().unwrap_or("");
            if self.resolve(verb).is_none() {
                issues.push(ReferenceIssue::new(
                    format!("/globalAliases/{alias}"),
                    format!("expansion {expansion:?} does not start with a known command"),
                ));
            }
        }

        let known: HashSet<&str> = self.commands.iter().map(|c| c.id.as_str()).collect();
        for (i, command) in self.commands.iter().enumerate() {
            let Some(help) = &command.help else {
                continue;
            };
            for (j, other) in help.see_also.iter().enumerate() {
                if !known.contains(other.as_str()) {
                    issues.push(ReferenceIssue::new(
                        format!("/commands/{i}/help/seeAlso/{j}"),
                        format!("unknown command {:?}", other.as_str()),
                    ));
                }
            }
        }

        issues
    }
}
