/*
* Template lookups, from the catalog listing to the flattened output.
*/
use crate::catalog::CatalogProvider;
use crate::filter::{filter, narrow, resolve_one, ConstraintSet};
use crate::flatten::TemplateOutput;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{Display, EnumString};

// Error Handling
use log::{info, warn};
use onetpl_error::OnetplError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortOn {
    #[default]
    Id,
    Name,
    Cpu,
    Vcpu,
    Memory,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

/**
* Resolve the single template matching the constraints and flatten it.
*/
pub fn lookup<P>(provider: &P, constraints: &ConstraintSet) -> Result<TemplateOutput, OnetplError>
where
    P: CatalogProvider + ?Sized,
{
    constraints.validate()?;
    let templates = provider.list_templates()?;

    let matched = filter(&templates, constraints);
    let template = resolve_one(matched, constraints.id_filter())?;
    info!("Resolved template {} ({:?}).", template.id, template.name);

    let output = template.flatten()?;
    Ok(output)
}

/**
* Flatten every template matching the constraints, sorted.
* Matching nothing is not an error here, and templates that
* can't be flattened are skipped with a warning.
*/
pub fn list<P>(
    provider: &P,
    constraints: &ConstraintSet,
    sort_on: SortOn,
    order: Order,
) -> Result<Vec<TemplateOutput>, OnetplError>
where
    P: CatalogProvider + ?Sized,
{
    constraints.validate()?;
    let templates = provider.list_templates()?;

    let matched = narrow(filter(&templates, constraints), constraints.id_filter());
    let mut outputs = vec![];
    for template in matched {
        match template.flatten() {
            Ok(output) => outputs.push(output),
            Err(e) => warn!(
                "Skip template {} ({:?}): {}: {}",
                template.id, template.name, e, e.origin
            ),
        }
    }
    sort(&mut outputs, sort_on, order);
    Ok(outputs)
}

fn compare(a: &TemplateOutput, b: &TemplateOutput, sort_on: SortOn) -> Ordering {
    match sort_on {
        SortOn::Id => a.id.cmp(&b.id),
        SortOn::Name => a.name.cmp(&b.name),
        // Unset values come first.
        SortOn::Cpu => a.cpu.partial_cmp(&b.cpu).unwrap_or(Ordering::Equal),
        SortOn::Vcpu => a.vcpu.cmp(&b.vcpu),
        SortOn::Memory => a.memory.cmp(&b.memory),
    }
}

/// Stable sort: equal keys keep catalog order.
pub fn sort(outputs: &mut [TemplateOutput], sort_on: SortOn, order: Order) {
    outputs.sort_by(|a, b| match order {
        Order::Asc => compare(a, b, sort_on),
        Order::Desc => compare(b, a, sort_on),
    });
}
