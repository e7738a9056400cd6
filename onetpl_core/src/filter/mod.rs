/*
* Narrow a template catalog down with caller constraints.
*/
mod constraints;
pub mod resolve;
pub mod tags;

// Reexports
pub use constraints::{ConstraintSet, UNCONSTRAINED_ID};
pub use resolve::{narrow, resolve_one};

use crate::template::Template;

// Error Handling
use log::{debug, trace};

/**
* Returns the templates satisfying every supplied constraint, in catalog order.
*
* Predicates are evaluated in a fixed order and the first failing one
* rejects the template: name, cpu, vcpu, memory, tags.
*/
pub fn filter<'a>(candidates: &'a [Template], constraints: &ConstraintSet) -> Vec<&'a Template> {
    let res: Vec<&Template> = candidates
        .iter()
        .filter(|e| match rejection(e, constraints) {
            Some(reason) => {
                trace!("template {} ({:?}) rejected: {}", e.id, e.name, reason);
                false
            }
            None => true,
        })
        .collect();
    debug!(
        "{} out of {} templates match the constraints.",
        res.len(),
        candidates.len()
    );
    res
}

/// The first constraint the template fails, if any.
fn rejection(template: &Template, constraints: &ConstraintSet) -> Option<&'static str> {
    let bag = &template.attributes;

    if let Some(name) = &constraints.name {
        if &template.name != name {
            return Some("name differs");
        }
    }

    let cpu = bag.get_cpu().found();
    if constraints.has_cpu && cpu.is_none() {
        return Some("no cpu");
    }
    if let Some(target) = constraints.cpu {
        if cpu != Some(target) {
            return Some("cpu differs");
        }
    }

    let vcpu = bag.get_vcpu().found();
    if constraints.has_vcpu && vcpu.is_none() {
        return Some("no vcpu");
    }
    if let Some(target) = constraints.vcpu {
        if vcpu != Some(target) {
            return Some("vcpu differs");
        }
    }

    let memory = bag.get_memory().found();
    if constraints.has_memory && memory.is_none() {
        return Some("no memory");
    }
    if let Some(target) = constraints.memory {
        if memory != Some(target) {
            return Some("memory differs");
        }
    }

    if let Some(tags) = &constraints.tags {
        if !tags::matches(bag, tags) {
            return Some("tags differ");
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn ids(templates: &[&Template]) -> Vec<i64> {
        templates.iter().map(|e| e.id).collect()
    }

    fn catalog() -> Vec<Template> {
        vec![
            Template::new(1, "web").with("CPU", 2).with("MEMORY", 512),
            Template::new(2, "db").with("CPU", 4).with("VCPU", 4),
            Template::new(3, "bare"),
            Template::new(4, "web")
                .with("CPU", "0.5")
                .with("MEMORY", 1024)
                .with("env", "prod")
                .with("team", "x"),
        ]
    }

    #[test]
    fn no_constraints_keep_everything_in_order() {
        let templates = catalog();
        let res = filter(&templates, &ConstraintSet::default());
        assert_eq!(ids(&res), vec![1, 2, 3, 4]);
    }

    #[test]
    fn filter_by_name() {
        let templates = catalog();
        let constraints = ConstraintSet::builder().name("web").build();
        assert_eq!(ids(&filter(&templates, &constraints)), vec![1, 4]);
    }

    #[test]
    fn presence_constraints() {
        let templates = catalog();
        let constraints = ConstraintSet::builder().has_vcpu(true).build();
        assert_eq!(ids(&filter(&templates, &constraints)), vec![2]);

        let constraints = ConstraintSet::builder().has_memory(true).build();
        assert_eq!(ids(&filter(&templates, &constraints)), vec![1, 4]);
    }

    #[test]
    fn presence_rejects_whatever_the_target() {
        let templates = vec![Template::new(1, "nocpu").with("MEMORY", 512)];
        let with_target = ConstraintSet::builder().has_cpu(true).cpu(2.0).build();
        let without_target = ConstraintSet::builder().has_cpu(true).build();
        assert!(filter(&templates, &with_target).is_empty());
        assert!(filter(&templates, &without_target).is_empty());
    }

    #[test]
    fn value_constraints() {
        let templates = catalog();
        let constraints = ConstraintSet::builder().cpu(0.5).build();
        assert_eq!(ids(&filter(&templates, &constraints)), vec![4]);

        let constraints = ConstraintSet::builder().cpu(2.0).memory(512).build();
        assert_eq!(ids(&filter(&templates, &constraints)), vec![1]);

        let constraints = ConstraintSet::builder().vcpu(8).build();
        assert!(filter(&templates, &constraints).is_empty());
    }

    #[test]
    fn malformed_value_never_matches() {
        let templates = vec![Template::new(1, "odd").with("MEMORY", "lots")];
        let constraints = ConstraintSet::builder().has_memory(true).build();
        assert!(filter(&templates, &constraints).is_empty());
    }

    #[test]
    fn tags_subset() {
        let templates = catalog();
        let constraints = ConstraintSet::builder()
            .tags(BTreeMap::from([("env".to_owned(), "prod".to_owned())]))
            .build();
        assert_eq!(ids(&filter(&templates, &constraints)), vec![4]);
    }

    #[test]
    fn filter_is_repeatable() {
        let templates = catalog();
        let constraints = ConstraintSet::builder().name("web").has_cpu(true).build();
        let first = ids(&filter(&templates, &constraints));
        let second = ids(&filter(&templates, &constraints));
        assert_eq!(first, second);
        assert_eq!(templates, catalog());
    }
}
