use super::utils::*;
use crate::flatten::{DiskOutput, NicOutput, TemplateOutput, VmGroupRef};

use std::collections::BTreeMap;
use tabled::{
    settings::{disable::Remove, location::ByColumnName, Style},
    Table, Tabled,
};

// Error Handling
use log::{log_enabled, Level};
use onetpl_error::OnetplError;

#[derive(Default, Debug, Clone, PartialEq, Tabled)]
pub struct TemplateTable {
    pub id: i64,
    pub name: String,

    #[tabled(display("display_cpu"))]
    pub cpu: Option<f64>,
    #[tabled(display("display_option"))]
    pub vcpu: Option<i64>,
    #[tabled(display("display_memory"))]
    pub memory: Option<i64>,

    #[tabled(display("display_disks"))]
    pub disk: Vec<DiskOutput>,
    #[tabled(display("display_nics"))]
    pub nic: Vec<NicOutput>,
    #[tabled(display("display_vmgroup"))]
    pub vmgroup: Option<VmGroupRef>,
    #[tabled(display("display_tags"))]
    pub tags: Option<BTreeMap<String, String>>,
}

impl From<&TemplateOutput> for TemplateTable {
    fn from(e: &TemplateOutput) -> Self {
        Self {
            id: e.id,
            name: e.name.to_owned(),
            cpu: e.cpu,
            vcpu: e.vcpu,
            memory: e.memory,
            disk: e.disk.to_owned(),
            nic: e.nic.to_owned(),
            vmgroup: e.vmgroup.to_owned(),
            tags: e.tags.to_owned(),
        }
    }
}

impl TemplateTable {
    pub fn display(items: Vec<Self>) -> Result<(), OnetplError> {
        let mut res = Table::new(&items);

        // Hide columns nobody fills.
        if items.iter().all(|e| e.vmgroup.is_none()) {
            res.with(Remove::column(ByColumnName::new("vmgroup")));
        }
        if items.iter().all(|e| e.tags.is_none()) {
            res.with(Remove::column(ByColumnName::new("tags")));
        }

        if !log_enabled!(Level::Warn) {
            res.with(Remove::column(ByColumnName::new("nic")));
            res.with(Remove::column(ByColumnName::new("disk")));
        }
        res.with(Style::rounded());
        println!("{}", res);
        Ok(())
    }
}

impl TemplateOutput {
    pub fn display(items: &[Self]) -> Result<(), OnetplError> {
        let table: Vec<TemplateTable> = items.iter().map(TemplateTable::from).collect();
        TemplateTable::display(table)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{AttributeBag, Template};
    use pretty_assertions::assert_eq;

    // Error Handling
    use miette::Result;

    #[test]
    fn display_mock() -> Result<()> {
        let outputs = vec![
            Template::new(0, "alpine")
                .with("CPU", "0.5")
                .with("MEMORY", 256)
                .flatten()?,
            Template::new(1, "ubuntu")
                .with("VCPU", 2)
                .with("DISK", AttributeBag::new().with("IMAGE_ID", 4))
                .with("env", "prod")
                .flatten()?,
        ];
        let table: Vec<TemplateTable> = outputs.iter().map(TemplateTable::from).collect();
        assert_eq!(table[1].disk.len(), 1);
        TemplateOutput::display(&outputs)?;
        Ok(())
    }
}
