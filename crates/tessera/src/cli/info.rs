//! Info command implementation

use super::output::{self, OutputFormat};
use anyhow::Result;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tessera_types::{BasicKind, DbType, NativeType, StorageClass, TypeTag, db_type_of};

/// Configuration for info command
pub struct InfoConfig {
    pub tag: TypeTag,
    pub output_format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// Metadata of one type tag
#[derive(Debug, Clone, Serialize)]
pub struct TagInfo {
    pub tag: TypeTag,
    pub basic_kind: BasicKind,
    pub native_type: NativeType,
    pub storage_class: StorageClass,
    pub comparable: bool,
    pub arithmetic: bool,
    pub min_value: Option<String>,
    pub max_value: Option<String>,
    pub db_type: DbType,
}

impl TagInfo {
    pub fn new(tag: TypeTag) -> Self {
        Self {
            tag,
            basic_kind: tag.basic_kind(),
            native_type: tag.native_type(),
            storage_class: tag.storage_class(),
            comparable: tag.is_comparable(),
            arithmetic: tag.is_arithmetic(),
            min_value: tag.min_value().map(|v| v.to_string()),
            max_value: tag.max_value(None).map(|v| v.to_string()),
            db_type: db_type_of(tag),
        }
    }
}

impl fmt::Display for TagInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        writeln!(f, "{}", output::heading(self.tag.name()))?;
        writeln!(f, "  basic kind:    {}", self.basic_kind)?;
        writeln!(f, "  native type:   {:?}", self.native_type)?;
        writeln!(f, "  storage:       {:?}", self.storage_class)?;
        writeln!(f, "  comparable:    {}", self.comparable)?;
        writeln!(f, "  arithmetic:    {}", self.arithmetic)?;
        writeln!(f, "  min:           {}", or_dash(&self.min_value))?;
        writeln!(f, "  max:           {}", or_dash(&self.max_value))?;
        write!(f, "  db type:       {}", self.db_type)
    }
}

/// Run the info command
pub fn info(config: InfoConfig) -> Result<()> {
    let report = TagInfo::new(config.tag);
    output::print_report(&report, config.output_format, config.output_file.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_tag_info() {
        let info = TagInfo::new(TypeTag::Int16);
        assert_eq!(info.basic_kind, BasicKind::Numeric);
        assert!(info.arithmetic);
        assert_eq!(info.min_value.as_deref(), Some("-32768"));
        assert_eq!(info.max_value.as_deref(), Some("32767"));
        assert_eq!(info.db_type, DbType::Int16);
    }

    #[test]
    fn test_reference_tag_info() {
        let info = TagInfo::new(TypeTag::Json);
        assert!(!info.comparable);
        assert!(!info.arithmetic);
        assert_eq!(info.db_type, DbType::String);
    }
}
