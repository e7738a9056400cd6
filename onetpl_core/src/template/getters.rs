use super::{AttrValue, AttributeBag, CPU, MEMORY, VCPU};

// Error Handling
use onetpl_error::FieldError;

/*
* Outcome of a typed attribute lookup.
* Absence and zero are different things: nothing here defaults.
*/
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    Missing,
    Malformed(FieldError),
}

impl<T> Lookup<T> {
    /// Collapse to "found or not". Malformed values count as not found.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(v) => Some(v),
            _ => None,
        }
    }
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
    /// Missing is an acceptable outcome, a malformed value is not.
    pub fn optional(self) -> Result<Option<T>, FieldError> {
        match self {
            Lookup::Found(v) => Ok(Some(v)),
            Lookup::Missing => Ok(None),
            Lookup::Malformed(e) => Err(e),
        }
    }
    /// Both missing and malformed values are errors.
    pub fn required(self, key: &str, expected: &str) -> Result<T, FieldError> {
        match self {
            Lookup::Found(v) => Ok(v),
            Lookup::Missing => Err(FieldError::new(key, "", expected)),
            Lookup::Malformed(e) => Err(e),
        }
    }
}

impl AttributeBag {
    fn lookup<T, F>(&self, key: &str, expected: &str, cast: F) -> Lookup<T>
    where
        F: Fn(&AttrValue) -> Option<T>,
    {
        match self.get(key) {
            None => Lookup::Missing,
            Some(value) => match cast(value) {
                Some(v) => Lookup::Found(v),
                None => Lookup::Malformed(FieldError::new(key, &value.to_string(), expected)),
            },
        }
    }
    pub fn get_str(&self, key: &str) -> Lookup<String> {
        self.lookup(key, "string", |e| e.render())
    }
    pub fn get_int(&self, key: &str) -> Lookup<i64> {
        self.lookup(key, "integer", |e| match e {
            AttrValue::Num(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            AttrValue::Str(s) => s.trim().parse::<i64>().ok(),
            AttrValue::Block(_) => None,
        })
    }
    pub fn get_float(&self, key: &str) -> Lookup<f64> {
        self.lookup(key, "decimal", |e| match e {
            AttrValue::Num(n) => n.as_f64(),
            AttrValue::Str(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            AttrValue::Block(_) => None,
        })
    }

    pub fn get_cpu(&self) -> Lookup<f64> {
        self.get_float(CPU)
    }
    pub fn get_vcpu(&self) -> Lookup<i64> {
        self.get_int(VCPU)
    }
    /// Memory in MiB.
    pub fn get_memory(&self) -> Lookup<i64> {
        self.get_int(MEMORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cpu_from_string_and_number() {
        let bag = AttributeBag::new().with("CPU", "0.5");
        assert_eq!(bag.get_cpu(), Lookup::Found(0.5));

        let bag = AttributeBag::new().with("CPU", 2);
        assert_eq!(bag.get_cpu(), Lookup::Found(2.0));
    }

    #[test]
    fn absence_is_not_zero() {
        let bag = AttributeBag::new().with("MEMORY", 0);
        assert_eq!(bag.get_memory(), Lookup::Found(0));
        assert_eq!(bag.get_vcpu(), Lookup::Missing);
        assert_eq!(bag.get_cpu().found(), None);
    }

    #[test]
    fn malformed_is_reported_not_found() {
        let bag = AttributeBag::new()
            .with("VCPU", "two")
            .with("MEMORY", 1.5)
            .with("CPU", AttributeBag::new());

        let vcpu = bag.get_vcpu();
        assert_eq!(
            vcpu,
            Lookup::Malformed(FieldError::new("VCPU", "two", "integer"))
        );
        assert!(!vcpu.is_found());
        assert_eq!(bag.get_memory().found(), None);
        assert_eq!(bag.get_cpu().found(), None);
    }

    #[test]
    fn first_occurrence_wins() {
        let bag = AttributeBag::new().with("VCPU", 2).with("VCPU", 4);
        assert_eq!(bag.get_vcpu(), Lookup::Found(2));
    }

    #[test]
    fn optional_and_required() {
        let bag = AttributeBag::new().with("SIZE", "ten");
        assert_eq!(bag.get_int("TARGET").optional(), Ok(None));
        assert!(bag.get_int("SIZE").optional().is_err());
        assert_eq!(
            bag.get_int("IMAGE_ID").required("IMAGE_ID", "integer"),
            Err(FieldError::new("IMAGE_ID", "", "integer"))
        );
    }
}
