use crate::template::Template;

// Error Handling
use log::debug;
use onetpl_error::MatchError;

/// Keep the templates carrying the given id. No id keeps everything.
pub fn narrow<'a>(filtered: Vec<&'a Template>, id: Option<i64>) -> Vec<&'a Template> {
    match id {
        None => filtered,
        Some(id) => {
            debug!("Narrow matching templates to id {}.", id);
            filtered.into_iter().filter(|e| e.id == id).collect()
        }
    }
}

/**
* Narrow filtered templates by id and ensure exactly one is left.
*/
pub fn resolve_one<'a>(filtered: Vec<&'a Template>, id: Option<i64>) -> Result<&'a Template, MatchError> {
    let mut matched = narrow(filtered, id);
    match matched.len() {
        0 => Err(MatchError::NoMatch),
        1 => Ok(matched.remove(0)),
        _ => Err(MatchError::ambiguous(
            matched.iter().map(|e| e.id).collect(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter, ConstraintSet};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    // Error Handling
    use miette::{IntoDiagnostic, Result};

    #[test]
    fn resolve_by_name() -> Result<()> {
        let templates = vec![
            Template::new(1, "web").with("CPU", 2),
            Template::new(2, "db").with("CPU", 4),
        ];
        let constraints = ConstraintSet::builder().name("db").build();
        let res = resolve_one(filter(&templates, &constraints), constraints.id_filter())
            .into_diagnostic()?;
        assert_eq!(res.id, 2);
        Ok(())
    }

    #[test]
    fn same_name_is_ambiguous() {
        let templates = vec![Template::new(1, "web"), Template::new(2, "web")];
        let constraints = ConstraintSet::builder().name("web").build();
        let res = resolve_one(filter(&templates, &constraints), constraints.id_filter());
        match res {
            Err(MatchError::AmbiguousMatch { ids, .. }) => assert_eq!(ids, vec![1, 2]),
            _ => panic!("expected an ambiguous match, got {:?}", res),
        }
    }

    #[test]
    fn missing_memory_is_no_match() {
        let templates = vec![Template::new(1, "small").with("CPU", 2)];
        let constraints = ConstraintSet::builder().has_memory(true).build();
        let res = resolve_one(filter(&templates, &constraints), constraints.id_filter());
        assert!(matches!(res, Err(MatchError::NoMatch)));
    }

    #[test]
    fn tag_subset_resolves() -> Result<()> {
        let templates = vec![Template::new(1, "tagged")
            .with("env", "prod")
            .with("team", "x")];
        let constraints = ConstraintSet::builder()
            .tags(BTreeMap::from([("env".to_owned(), "prod".to_owned())]))
            .build();
        let res = resolve_one(filter(&templates, &constraints), constraints.id_filter())
            .into_diagnostic()?;
        assert_eq!(res.id, 1);
        Ok(())
    }

    #[test]
    fn sentinel_id_skips_narrowing() -> Result<()> {
        let templates = vec![Template::new(5, "only")];
        let constraints = ConstraintSet::builder().id(-1).build();
        assert_eq!(constraints.id_filter(), None);
        let res = resolve_one(filter(&templates, &constraints), constraints.id_filter())
            .into_diagnostic()?;
        assert_eq!(res.id, 5);
        Ok(())
    }

    #[test]
    fn id_narrows_after_filter() -> Result<()> {
        let templates = vec![
            Template::new(1, "web"),
            Template::new(2, "web"),
            Template::new(3, "db"),
        ];
        let constraints = ConstraintSet::builder().name("web").id(2).build();
        let res = resolve_one(filter(&templates, &constraints), constraints.id_filter())
            .into_diagnostic()?;
        assert_eq!(res.id, 2);

        // Id of a template rejected by the filter.
        let constraints = ConstraintSet::builder().name("web").id(3).build();
        let res = resolve_one(filter(&templates, &constraints), constraints.id_filter());
        assert!(matches!(res, Err(MatchError::NoMatch)));
        Ok(())
    }

    #[test]
    fn resolve_is_repeatable() {
        let templates = vec![Template::new(1, "web"), Template::new(2, "db")];
        let constraints = ConstraintSet::builder().name("db").build();
        let first = resolve_one(filter(&templates, &constraints), None).map(|e| e.clone());
        let second = resolve_one(filter(&templates, &constraints), None).map(|e| e.clone());
        assert_eq!(first.ok(), second.ok());
    }

    #[test]
    fn only_one_survivor_succeeds() {
        let templates: Vec<Template> = (0..4).map(|i| Template::new(i, "t")).collect();
        for n in 0..templates.len() {
            let filtered: Vec<&Template> = templates.iter().take(n).collect();
            let res = resolve_one(filtered, None);
            assert_eq!(res.is_ok(), n == 1);
        }
    }
}
