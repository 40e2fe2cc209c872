//! # 代码表列表命令
//!
//! 打印地表材料表与输出变量表。
//!
//! ## 依赖关系
//! - 被 `commands/mod.rs`, `commands/albedo.rs` 调用
//! - 使用 `models/catalog.rs`

use crate::error::Result;
use crate::models::{Material, OutputVariable};
use crate::utils::output;

use tabled::{Table, Tabled};

#[derive(Tabled)]
struct MaterialRow {
    #[tabled(rename = "Code")]
    code: u8,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Description")]
    description: &'static str,
}

#[derive(Tabled)]
struct OutputRow {
    #[tabled(rename = "IOUT")]
    code: u8,
    #[tabled(rename = "Variable")]
    description: &'static str,
    #[tabled(rename = "Unit")]
    unit: &'static str,
}

fn material_rows(filter: Option<&str>) -> Vec<MaterialRow> {
    let filter = filter.map(str::to_lowercase);
    Material::all()
        .filter(|m| match &filter {
            Some(f) => {
                m.name().to_lowercase().contains(f) || m.description().to_lowercase().contains(f)
            }
            None => true,
        })
        .map(|m| MaterialRow {
            code: m.code(),
            name: m.name(),
            description: m.description(),
        })
        .collect()
}

/// 打印材料表
pub fn list_materials(filter: Option<&str>) -> Result<()> {
    let rows = material_rows(filter);
    if rows.is_empty() {
        output::print_warning("No material matches the filter");
        return Ok(());
    }
    println!("{}", Table::new(&rows));
    output::print_info(&format!("{} materials", rows.len()));
    Ok(())
}

/// 打印输出变量表
pub fn list_outputs() -> Result<()> {
    let rows: Vec<OutputRow> = OutputVariable::all()
        .map(|o| OutputRow {
            code: o.code(),
            description: o.description(),
            unit: o.unit(),
        })
        .collect();
    println!("{}", Table::new(&rows));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_filter() {
        assert_eq!(material_rows(None).len(), 67);
        let snow = material_rows(Some("snow"));
        assert!(snow.iter().any(|r| r.name == "FineSnow"));
        assert!(snow.iter().all(|r| {
            r.name.to_lowercase().contains("snow") || r.description.to_lowercase().contains("snow")
        }));
    }
}
