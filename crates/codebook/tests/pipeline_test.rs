//! End-to-end pipeline tests: workspace directory in, TSV codebooks out.

use std::fs;
use std::path::Path;

use codebook::{CodebookError, CodebookSelector, DirectorySource, RunParameters, run};

const NET: &str = r#"name = "LPROCtest_main",
version = 3,
stamp = 1530000000

node = {
	id = 1,
	can_start = 1,
	ntype = "rule",
	outputs = {
		{
			id = "1",
			target = 2
		}
	},
	parts = {
		{
			ruleparts = {
				{
					reference = "x"
				}
			}
		}
	}
}

node = {
	id = 2,
	ntype = "router",
	outputs = {
		{
			id = "yes",
			target = 3
		}
	},
	parts = {
		{
			rule = "F"
		}
	}
}

node = {
	id = 3,
	form_part = 1,
	parts = {
		{
			_name = "text_input",
			caption = "Concept one",
			path = "concept1",
			data_type = "text"
		}
	}
}
"#;

fn write_workspace(dir: &Path) {
    fs::write(dir.join("settings"), "version = \"7.12\"\n").expect("settings");
    fs::write(dir.join("LPROCtest_main.net"), NET).expect("net");
}

fn params(workspace: &Path, selector: CodebookSelector) -> RunParameters {
    RunParameters {
        protocol_prefix: "LPROCtest_".to_string(),
        nets: None,
        overwrite_file: None,
        output_dir: workspace.join("out"),
        selector,
        separate_sheets: false,
    }
}

#[test]
fn a_workspace_becomes_a_palga_codebook() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_workspace(dir.path());
    let source = DirectorySource::new(dir.path());
    let run_params = params(dir.path(), CodebookSelector::Palga);
    run(&run_params, &source).expect("run");

    let text = fs::read_to_string(run_params.output_dir.join("LPROCtest_codebook_12_PALGA.tsv"))
        .expect("codebook");
    assert!(text.starts_with("## CODEBOOK\n"));
    assert!(text.contains(
        "concept1\tConcept one\ttext_input\ttext\t\t\t[x == 1] AND [F == yes]\n"
    ));
    // No conflicts, so no report.
    assert!(!run_params
        .output_dir
        .join("LPROCtest_ConflictingCaptions.txt")
        .exists());
}

#[test]
fn the_combined_selector_writes_the_whole_bundle() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_workspace(dir.path());
    let source = DirectorySource::new(dir.path());
    let run_params = params(dir.path(), CodebookSelector::Combined);
    run(&run_params, &source).expect("run");

    for file in [
        "LPROCtest_codebook_12_NKI_sep.tsv",
        "LPROCtest_codebook_12_PALGA.tsv",
        "LPROCtest_codebook_12_PALGA_sep.tsv",
        "LPROCtest_codebook_12_PALGAWEB.tsv",
        "LPROCtest_codebook_12_PALGAWEB_sep.tsv",
    ] {
        assert!(run_params.output_dir.join(file).exists(), "missing {file}");
    }
}

#[test]
fn caption_overrides_require_the_matching_header() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_workspace(dir.path());
    let overrides = dir.path().join("overrides.txt");
    fs::write(&overrides, "#LPROCwrong\nconcept1\tBetter caption\n").expect("overrides");

    let source = DirectorySource::new(dir.path());
    let mut run_params = params(dir.path(), CodebookSelector::Palga);
    run_params.overwrite_file = Some(overrides);
    assert!(matches!(
        run(&run_params, &source),
        Err(CodebookError::OverwriteHeader { expected, .. }) if expected == "#LPROCtest"
    ));
}

#[test]
fn caption_overrides_rewrite_the_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_workspace(dir.path());
    let overrides = dir.path().join("overrides.txt");
    fs::write(&overrides, "#LPROCtest\nconcept1\tBetter caption\n").expect("overrides");

    let source = DirectorySource::new(dir.path());
    let mut run_params = params(dir.path(), CodebookSelector::Palga);
    run_params.overwrite_file = Some(overrides);
    run(&run_params, &source).expect("run");

    let text = fs::read_to_string(run_params.output_dir.join("LPROCtest_codebook_12_PALGA.tsv"))
        .expect("codebook");
    assert!(text.contains("concept1\tBetter caption\t"));
}

#[test]
fn conflicting_captions_across_nets_are_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_workspace(dir.path());
    // A second net collects the same concept under a different caption.
    let other = NET
        .replace("LPROCtest_main", "LPROCtest_other")
        .replace("Concept one", "Concept uno");
    fs::write(dir.path().join("LPROCtest_other.net"), other).expect("net");

    let source = DirectorySource::new(dir.path());
    let run_params = params(dir.path(), CodebookSelector::Palga);
    run(&run_params, &source).expect("run");

    let report = fs::read_to_string(
        run_params
            .output_dir
            .join("LPROCtest_ConflictingCaptions.txt"),
    )
    .expect("report");
    assert!(report.starts_with("concept1\t"));
    assert!(report.contains("Concept one"));
    assert!(report.contains("Concept uno"));

    // Both unmerged items stay in the codebook.
    let text = fs::read_to_string(run_params.output_dir.join("LPROCtest_codebook_12_PALGA.tsv"))
        .expect("codebook");
    assert_eq!(text.matches("concept1\t").count(), 2);
}
