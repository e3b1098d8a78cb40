//! End-to-end tests: crate sources on disk through to written units.

mod common;

use anyhow::{Context, Result, anyhow, ensure};
use common::CrateTree;
use rstest::rstest;
use static_string_util::{
    CfgSet, CrateSource, Diagnostic, FieldRendering, FsEmitter, GeneratorConfig, Round,
    StringUtilError,
};

const LIB: &str = "pub mod model;\n";

const MODEL: &str = r"
use static_string_util::static_string_util;

#[static_string_util]
pub struct User {
    name: String,
    email: String,
}

#[static_string_util]
struct Hidden {
    secret: String,
}

#[static_string_util]
pub trait Shape {
    fn area(&self) -> f64;
}

#[static_string_util]
pub struct Ping;

pub struct Unmarked {
    value: u8,
}
";

fn run(tree: &CrateTree, config: &GeneratorConfig) -> Result<(Vec<Diagnostic>, Option<String>)> {
    run_with_cfg(tree, config, CfgSet::current())
}

fn run_with_cfg(
    tree: &CrateTree,
    config: &GeneratorConfig,
    cfg: CfgSet,
) -> Result<(Vec<Diagnostic>, Option<String>)> {
    let source = CrateSource::discover(&tree.root)?.with_cfg(cfg);
    let mut sink: Vec<Diagnostic> = Vec::new();
    let mut emitter = FsEmitter::new(tree.out_dir());
    let report = Round::new(config, &source, &mut sink, &mut emitter).run()?;
    let written = report
        .emitted
        .map(|emitted| std::fs::read_to_string(&emitted.path).context("read unit"))
        .transpose()?;
    Ok((sink, written))
}

#[rstest]
fn generates_unit_for_valid_declarations() -> Result<()> {
    let tree = CrateTree::new(&[("src/lib.rs", LIB), ("src/model.rs", MODEL)])?;
    let (diagnostics, written) = run(&tree, &GeneratorConfig::default())?;

    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    ensure!(
        messages
            == [
                "Classes annotated with #[static_string_util] must be public.",
                "Classes annotated with #[static_string_util] must not be abstract.",
            ],
        "unexpected diagnostics: {messages:?}"
    );
    ensure!(
        diagnostics
            .iter()
            .all(|d| d.anchor.as_ref().is_some_and(|a| a.file.ends_with("src/model.rs"))),
        "diagnostics must be anchored in model.rs"
    );

    let source = written.ok_or_else(|| anyhow!("unit expected"))?;
    ensure!(
        tree.out_dir().join("model/string_util.rs").is_file(),
        "unit must live in the package directory"
    );
    ensure!(source.contains("pub struct StringUtil;"), "{source}");
    ensure!(
        source.contains("CreateString<crate::model::User> for StringUtil"),
        "{source}"
    );
    ensure!(source.contains(r#""User{{name='{}',email='{}',}}""#), "{source}");
    ensure!(source.contains(r#"String::from("Ping{}")"#), "{source}");
    ensure!(!source.contains("Hidden"), "rejected type generated: {source}");
    ensure!(!source.contains("Unmarked"), "unmarked type generated: {source}");
    Ok(())
}

#[rstest]
fn crate_root_anchor_writes_nothing() -> Result<()> {
    let tree = CrateTree::new(&[
        (
            "src/lib.rs",
            "#[static_string_util]\npub struct Loose;\npub mod model;\n",
        ),
        ("src/model.rs", MODEL),
    ])?;
    let (diagnostics, written) = run(&tree, &GeneratorConfig::default())?;
    ensure!(written.is_none(), "no unit may be written");
    ensure!(!tree.out_dir().exists(), "output directory must stay untouched");
    let last = diagnostics
        .last()
        .ok_or_else(|| anyhow!("diagnostic expected"))?;
    ensure!(
        last.message == "Couldn't generate class: the package of Loose has no name",
        "unexpected message: {}",
        last.message
    );
    Ok(())
}

#[rstest]
fn crate_without_marked_types_is_silent() -> Result<()> {
    let tree = CrateTree::new(&[("src/lib.rs", "pub struct Plain { value: u8 }\n")])?;
    let (diagnostics, written) = run(&tree, &GeneratorConfig::default())?;
    ensure!(diagnostics.is_empty(), "{diagnostics:?}");
    ensure!(written.is_none(), "no unit expected");
    Ok(())
}

#[rstest]
fn repeated_rounds_are_byte_identical() -> Result<()> {
    let tree = CrateTree::new(&[("src/lib.rs", LIB), ("src/model.rs", MODEL)])?;
    let (_, first) = run(&tree, &GeneratorConfig::default())?;
    let (_, second) = run(&tree, &GeneratorConfig::default())?;
    ensure!(first.is_some() && first == second, "outputs differ between rounds");
    Ok(())
}

#[rstest]
fn configuration_changes_marker_name_and_rendering() -> Result<()> {
    let tree = CrateTree::new(&[
        ("src/lib.rs", LIB),
        (
            "src/model.rs",
            "#[to_text]\npub struct Maybe { value: Option<u8> }\n",
        ),
    ])?;
    let config = GeneratorConfig {
        marker: static_string_util::Marker::new("to_text"),
        type_name: "TextUtil".to_owned(),
        field_rendering: FieldRendering::Debug,
        ..GeneratorConfig::default()
    };
    let (diagnostics, written) = run(&tree, &config)?;
    ensure!(diagnostics.is_empty(), "{diagnostics:?}");
    let source = written.ok_or_else(|| anyhow!("unit expected"))?;
    ensure!(tree.out_dir().join("model/text_util.rs").is_file(), "file name follows type name");
    ensure!(source.contains("pub struct TextUtil;"), "{source}");
    ensure!(source.contains(r#""Maybe{{value='{:?}',}}""#), "{source}");
    Ok(())
}

#[rstest]
fn unparsable_source_fails_the_round() -> Result<()> {
    let tree = CrateTree::new(&[("src/lib.rs", "pub mod model;"), ("src/model.rs", "pub struct")])?;
    let result = run(&tree, &GeneratorConfig::default());
    let err = result.err().ok_or_else(|| anyhow!("parse failure expected"))?;
    ensure!(
        matches!(
            err.downcast_ref::<StringUtilError>(),
            Some(StringUtilError::Source(_))
        ),
        "unexpected error: {err}"
    );
    Ok(())
}

const GATED: &str = r#"
use static_string_util::static_string_util;

#[static_string_util]
pub struct User {
    name: String,
    #[cfg(feature = "audit")]
    audit_id: u64,
}

#[cfg(unix)]
#[static_string_util]
pub struct Path {
    raw: String,
}

#[cfg(windows)]
#[static_string_util]
pub struct Path {
    wide: Vec<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[static_string_util]
    pub struct Fixture;
}
"#;

#[rstest]
#[case::without_feature(CfgSet::new().with_flag("unix"), r#""User{{name='{}',}}""#)]
#[case::with_feature(
    CfgSet::new().with_flag("unix").with_feature("audit"),
    r#""User{{name='{}',audit_id='{}',}}""#
)]
fn compiled_out_declarations_are_not_generated(
    #[case] cfg: CfgSet,
    #[case] user_template: &str,
) -> Result<()> {
    let tree = CrateTree::new(&[("src/lib.rs", LIB), ("src/model.rs", GATED)])?;
    let (diagnostics, written) = run_with_cfg(&tree, &GeneratorConfig::default(), cfg)?;
    ensure!(diagnostics.is_empty(), "{diagnostics:?}");
    let source = written.ok_or_else(|| anyhow!("unit expected"))?;
    ensure!(source.contains(user_template), "{source}");
    ensure!(
        source.matches("CreateString<crate::model::Path>").count() == 1,
        "exactly one Path impl expected: {source}"
    );
    ensure!(source.contains(r#""Path{{raw='{}',}}""#), "unix variant expected: {source}");
    ensure!(!source.contains("Fixture"), "test-only type generated: {source}");
    Ok(())
}

#[rstest]
fn test_only_modules_are_not_walked() -> Result<()> {
    let tree = CrateTree::new(&[
        ("src/lib.rs", "pub mod model;\n#[cfg(test)]\nmod fixtures;\n"),
        ("src/model.rs", "#[static_string_util]\npub struct User { name: String }\n"),
        ("src/fixtures.rs", "#[static_string_util]\nstruct Private;\n"),
    ])?;
    let (diagnostics, written) = run_with_cfg(&tree, &GeneratorConfig::default(), CfgSet::host())?;
    ensure!(diagnostics.is_empty(), "fixtures must not be validated: {diagnostics:?}");
    ensure!(written.is_some(), "unit expected");
    Ok(())
}
