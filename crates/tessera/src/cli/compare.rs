//! Compare command implementation

use super::output::{self, OutputFormat};
use anyhow::{Context, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;
use tessera_types::{TypeSniffer, TypeTag, Variant, best_compare_type};

/// Configuration for compare command
pub struct CompareConfig {
    pub left: String,
    pub right: String,
    pub left_type: Option<TypeTag>,
    pub right_type: Option<TypeTag>,
    pub output_format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// One side of a comparison
#[derive(Debug, Clone, Serialize)]
pub struct Operand {
    pub text: String,
    pub tag: TypeTag,
    pub value: String,
}

/// Outcome of comparing two values
#[derive(Debug, Clone, Serialize)]
pub struct CompareReport {
    pub left: Operand,
    pub right: Operand,
    pub promoted: TypeTag,
    pub ordering: &'static str,
    pub equal: bool,
}

impl fmt::Display for CompareReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "left:     {} ({})", self.left.value, self.left.tag)?;
        writeln!(f, "right:    {} ({})", self.right.value, self.right.tag)?;
        writeln!(f, "promoted: {}", self.promoted)?;
        write!(
            f,
            "result:   {} {} {}",
            self.left.value, self.ordering, self.right.value
        )
    }
}

/// Build a value from text, sniffing its tag unless one is given
fn operand(text: &str, tag: Option<TypeTag>) -> Result<(Operand, Variant)> {
    let tag = tag.unwrap_or_else(|| {
        let mut sniffer = TypeSniffer::new();
        sniffer.observe(Some(text));
        sniffer.best_type()
    });
    let value = Variant::from_dynamic(tag, text)
        .with_context(|| format!("Failed to read {text:?} as {tag}"))?;
    let operand = Operand {
        text: text.to_string(),
        tag: value.tag(),
        value: value.to_string(),
    };
    Ok((operand, value))
}

/// Compare two values given as text
pub fn compare_values(
    left: &str,
    right: &str,
    left_type: Option<TypeTag>,
    right_type: Option<TypeTag>,
) -> Result<CompareReport> {
    let (left, left_value) = operand(left, left_type)?;
    let (right, right_value) = operand(right, right_type)?;
    let promoted = best_compare_type(left.tag, right.tag);
    let ordering = left_value
        .compare(&right_value)
        .with_context(|| format!("Cannot compare {} with {}", left.tag, right.tag))?;

    Ok(CompareReport {
        left,
        right,
        promoted,
        ordering: match ordering {
            Ordering::Less => "<",
            Ordering::Equal => "==",
            Ordering::Greater => ">",
        },
        equal: ordering == Ordering::Equal,
    })
}

/// Run the compare command
pub fn compare(config: CompareConfig) -> Result<()> {
    let report = compare_values(
        &config.left,
        &config.right,
        config.left_type,
        config.right_type,
    )?;
    output::print_report(&report, config.output_format, config.output_file.as_deref())
}
