use crate::template::AttributeBag;
use std::collections::BTreeMap;

/**
* Returns true if every constraint tag is found among the template scalar pairs
* with the exact same value (case sensitive).
* A repeated key is compared on its first value only.
* Template pairs absent from the constraints are ignored.
*/
pub fn matches(bag: &AttributeBag, tags: &BTreeMap<String, String>) -> bool {
    tags.iter()
        .all(|(key, value)| bag.scalar(key).as_ref() == Some(value))
}
