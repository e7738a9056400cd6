use crate::flatten::{DiskOutput, NicOutput, VmGroupRef};
use human_bytes::human_bytes;
use owo_colors::OwoColorize;
use std::collections::BTreeMap;
use std::fmt::Display;

pub fn display_option<T: Display>(value: &Option<T>) -> String {
    match value {
        Some(value) => format!("{}", value),
        None => "-".dimmed().to_string(),
    }
}
pub fn display_cpu(cpu: &Option<f64>) -> String {
    display_option(cpu)
}
/// Memory is expressed in MiB.
pub fn display_memory(memory: &Option<i64>) -> String {
    match memory {
        Some(memory) => human_bytes((*memory as f64) * 1024_f64.powi(2)),
        None => display_option(memory),
    }
}
pub fn display_disks(disks: &Vec<DiskOutput>) -> String {
    let strs: Vec<String> = disks
        .iter()
        .map(|e| match (e.image_id, &e.volatile_type) {
            (Some(id), _) => format!("image {}", id),
            (None, Some(kind)) => format!("volatile {}", kind),
            (None, None) => "disk".to_owned(),
        })
        .collect();
    strs.join("\n")
}
pub fn display_nics(nics: &Vec<NicOutput>) -> String {
    let strs: Vec<String> = nics
        .iter()
        .map(|e| match (e.network_id, &e.network) {
            (Some(id), _) => format!("net {}", id),
            (None, Some(name)) => format!("net {}", name),
            (None, None) => "nic".to_owned(),
        })
        .collect();
    strs.join("\n")
}
pub fn display_vmgroup(vmgroup: &Option<VmGroupRef>) -> String {
    match vmgroup {
        Some(e) => format!("{} ({})", e.vmgroup_id, e.role.blue()),
        None => display_option::<String>(&None),
    }
}
pub fn display_tags(tags: &Option<BTreeMap<String, String>>) -> String {
    match tags {
        Some(tags) => tags
            .iter()
            .map(|(k, v)| format!("{}={}", k.green(), v))
            .collect::<Vec<String>>()
            .join("\n"),
        None => display_option::<String>(&None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn memory_in_human_units() {
        assert!(display_memory(&Some(2048)).contains("GiB"));
        assert!(display_memory(&Some(512)).contains("MiB"));
    }

    #[test]
    fn disks_one_per_line() {
        let disks = vec![
            DiskOutput {
                image_id: Some(3),
                ..Default::default()
            },
            DiskOutput {
                volatile_type: Some("swap".to_owned()),
                ..Default::default()
            },
        ];
        assert_eq!(display_disks(&disks), "image 3\nvolatile swap");
    }
}
