use crate::convert::Format;
use crate::filter::ConstraintSet;
use crate::query::{Order, SortOn};

use clap::{Args, Parser, Subcommand, ValueHint};
use clap_verbosity_flag::Verbosity;
use std::collections::BTreeMap;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub commands: Commands,
    #[command(flatten)]
    pub verbose: Verbosity,

    /// Template catalog file (toml or json).
    /// Defaults to the configured one.
    #[arg(long, global = true, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub catalog: Option<String>,
}

#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum Commands {
    /// Operations on templates
    #[command(subcommand)]
    Template(TemplateArgs),
}

#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum TemplateArgs {
    /// Resolve the single template matching the constraints.
    Get(GetArgs),
    /// List every template matching the constraints.
    Ls(LsArgs),
}

#[derive(Default, Debug, Args, Clone, PartialEq)]
pub struct GetArgs {
    #[command(flatten)]
    pub constraints: ConstraintArgs,
    #[arg(long, value_enum, default_value_t = Format::Table)]
    pub format: Format,
}

#[derive(Default, Debug, Args, Clone, PartialEq)]
pub struct LsArgs {
    #[command(flatten)]
    pub constraints: ConstraintArgs,
    #[arg(long, value_name = "FIELD", default_value_t = SortOn::Id)]
    pub sort_on: SortOn,
    #[arg(long, default_value_t = Order::Asc)]
    pub order: Order,
    #[arg(long, value_enum, default_value_t = Format::Table)]
    pub format: Format,
}

#[derive(Default, Debug, Args, Clone, PartialEq)]
pub struct ConstraintArgs {
    /// Read constraints from a toml file.
    /// Flags given on the command line take precedence.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub query: Option<String>,

    #[arg(long, value_name = "TEMPLATE_ID", allow_negative_numbers = true)]
    pub id: Option<i64>,
    #[arg(long, value_name = "TEMPLATE_NAME")]
    pub name: Option<String>,

    /// Require a CPU definition. `--has-cpu=false` lifts the requirement.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub has_cpu: Option<bool>,
    /// Require a VCPU definition. `--has-vcpu=false` lifts the requirement.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub has_vcpu: Option<bool>,
    /// Require a memory definition. `--has-memory=false` lifts the requirement.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub has_memory: Option<bool>,

    #[arg(long)]
    pub cpu: Option<f64>,
    #[arg(long)]
    pub vcpu: Option<i64>,
    /// Memory in MiB.
    #[arg(long)]
    pub memory: Option<i64>,

    /// Tag the template must carry, as KEY=VALUE. Repeatable.
    #[arg(long = "tag", value_name = "KEY=VALUE", value_parser = parse_tag)]
    pub tags: Vec<(String, String)>,
}

fn parse_tag(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.is_empty() => Ok((k.to_owned(), v.to_owned())),
        _ => Err(format!("invalid tag {:?}, expected KEY=VALUE", s)),
    }
}

impl ConstraintArgs {
    /// Override the base constraints with every flag given on the command line.
    pub fn apply(&self, base: ConstraintSet) -> ConstraintSet {
        let tags: BTreeMap<String, String> = self.tags.iter().cloned().collect();
        ConstraintSet {
            id: self.id.unwrap_or(base.id),
            name: self.name.to_owned().or(base.name),
            has_cpu: self.has_cpu.unwrap_or(base.has_cpu),
            has_vcpu: self.has_vcpu.unwrap_or(base.has_vcpu),
            has_memory: self.has_memory.unwrap_or(base.has_memory),
            cpu: self.cpu.or(base.cpu),
            vcpu: self.vcpu.or(base.vcpu),
            memory: self.memory.or(base.memory),
            tags: match tags.is_empty() {
                true => base.tags,
                false => Some(tags),
            },
        }
    }
}

impl From<&ConstraintArgs> for ConstraintSet {
    fn from(e: &ConstraintArgs) -> Self {
        e.apply(ConstraintSet::default())
    }
}
