//! End-to-end tests for the prophage-merger binary.
//!
//! Tests cover:
//! 1. The three-tool overlap scenario and all three artifacts
//! 2. Default and overridden output paths
//! 3. Empty inputs and the sentinel output
//! 4. Exit codes for malformed and missing input

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// =============================================================================
// Helper functions
// =============================================================================

const BOUNDARY_HEADER: &str = "seqname\ttrim_orf_index_start\ttrim_orf_index_end\ttrim_bp_start\ttrim_bp_end\tseqname_new\n";
const GENOMAD_HEADER: &str =
    "seq_name\tsource_seq\tstart\tend\tlength\tintegrase\tn_genes\tgenetic_code\tvirus_score\n";
const VIBRANT_HEADER: &str = "scaffold\tfragment\tprotein start\tprotein stop\tprotein length\tnucleotide start\tnucleotide stop\tnucleotide length\n";

struct Inputs {
    dir: TempDir,
    virsorter2: PathBuf,
    checkv: PathBuf,
    genomad: PathBuf,
    vibrant: PathBuf,
}

impl Inputs {
    fn args(&self) -> Vec<String> {
        vec![
            "--virsorter2".to_string(),
            self.virsorter2.display().to_string(),
            "--checkv".to_string(),
            self.checkv.display().to_string(),
            "--genomad".to_string(),
            self.genomad.display().to_string(),
            "--vibrant".to_string(),
            self.vibrant.display().to_string(),
        ]
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }
}

fn create_inputs(boundary: &str, checkv: &str, genomad: &str, vibrant: &str) -> Inputs {
    let dir = tempfile::tempdir().unwrap();
    let inputs = Inputs {
        virsorter2: dir.path().join("final-viral-boundary.tsv"),
        checkv: dir.path().join("proviruses.fna"),
        genomad: dir.path().join("genome_provirus.tsv"),
        vibrant: dir.path().join("VIBRANT_integrated_prophage_coordinates.tsv"),
        dir,
    };
    fs::write(&inputs.virsorter2, boundary).unwrap();
    fs::write(&inputs.checkv, checkv).unwrap();
    fs::write(&inputs.genomad, genomad).unwrap();
    fs::write(&inputs.vibrant, vibrant).unwrap();
    inputs
}

fn scenario_inputs() -> Inputs {
    create_inputs(
        &format!(
            "{BOUNDARY_HEADER}chr1\t1\t12\t51\t1200\tchr1||0_partial\n\
             NODE_5\t1\t30\t1\t9000\tNODE_5||full\n"
        ),
        ">chr1||0_partial_1 50-150/1150\nACGTACGT\nACGT\n\
         >NODE_5||full_1 2001-4000/9000\nACGT\n",
        &format!(
            "{GENOMAD_HEADER}chr1|provirus_150_300\tchr1\t150\t300\t151\tNA\t4\t11\t0.95\n\
             NODE_5|provirus_3500_5000\tNODE_5\t3500\t5000\t1501\tNA\t6\t11\t0.91\n"
        ),
        &format!(
            "{VIBRANT_HEADER}chr1 length=10000 cov=3.2\tchr1_fragment_2\tchr1_40\tchr1_47\t8\t500\t600\t101\n"
        ),
    )
}

fn run_merger(dir: &Path, args: &[String]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_prophage-merger"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to run prophage-merger")
}

fn is_success(output: &Output) -> bool {
    output.status.success()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

// =============================================================================
// Populated runs
// =============================================================================

#[test]
fn test_scenario_default_outputs() {
    let inputs = scenario_inputs();
    let output = run_merger(inputs.path(), &inputs.args());
    assert!(is_success(&output), "stderr: {}", stderr(&output));

    assert_eq!(
        read(inputs.path(), "final_coordinates.txt"),
        "chr\tregion\tstart\tend\tlength\n\
         NODE_5\tregion_1\t2001\t5000\t3000\n\
         chr1\tregion_1\t100\t300\t201\n\
         chr1\tregion_2\t500\t600\t101\n"
    );
    assert_eq!(
        read(inputs.path(), "final_coordinates_0-based.bed"),
        "NODE_5\t2000\t5000\tregion_1\n\
         chr1\t99\t300\tregion_1\n\
         chr1\t499\t600\tregion_2\n"
    );
}

#[test]
fn test_all_coordinates_table() {
    let inputs = scenario_inputs();
    let output = run_merger(inputs.path(), &inputs.args());
    assert!(is_success(&output), "stderr: {}", stderr(&output));

    let all = read(inputs.path(), "all_coordinates.txt");
    let lines: Vec<&str> = all.lines().collect();
    assert_eq!(lines[0], "chr_name\tseq_name\tseq_id\tstart\tend\tmethod");
    assert_eq!(lines.len(), 6);
    assert_eq!(
        lines[1],
        "NODE_5\tNODE_5||full\t1\t2001\t4000\tVirSorter2 + CheckV"
    );
    assert_eq!(
        lines[2],
        "NODE_5\tNODE_5|provirus_3500_5000\t\t3500\t5000\tGeNomad"
    );
    assert_eq!(lines[3], "chr1\tchr1||0_partial\t1\t100\t200\tVirSorter2 + CheckV");
    assert_eq!(lines[5], "chr1\tchr1_fragment_2\t\t500\t600\tVibrant");
}

#[test]
fn test_output_path_overrides() {
    let inputs = scenario_inputs();
    let out_dir = inputs.path().join("results");
    fs::create_dir(&out_dir).unwrap();

    let mut args = inputs.args();
    args.extend([
        "--all-coordinates".to_string(),
        out_dir.join("all.tsv").display().to_string(),
        "--final_coordinates".to_string(),
        out_dir.join("final.tsv").display().to_string(),
        "--bed-file".to_string(),
        out_dir.join("regions.bed").display().to_string(),
    ]);

    let output = run_merger(inputs.path(), &args);
    assert!(is_success(&output), "stderr: {}", stderr(&output));

    assert!(out_dir.join("all.tsv").exists());
    assert!(out_dir.join("final.tsv").exists());
    assert!(out_dir.join("regions.bed").exists());
    assert!(!inputs.path().join("final_coordinates.txt").exists());
}

#[test]
fn test_stats_flag() {
    let inputs = scenario_inputs();
    let mut args = inputs.args();
    args.push("--stats".to_string());

    let output = run_merger(inputs.path(), &args);
    assert!(is_success(&output));
    assert!(stderr(&output).contains("merged into 3 regions on 2 chromosomes"));
}

#[test]
fn test_numeric_chromosome_names_preserved() {
    let inputs = create_inputs(
        "",
        "",
        &format!("{GENOMAD_HEADER}0012|provirus_10_90\t0012\t10\t90\t81\tNA\t2\t11\t0.9\n"),
        VIBRANT_HEADER,
    );
    let output = run_merger(inputs.path(), &inputs.args());
    assert!(is_success(&output), "stderr: {}", stderr(&output));

    assert_eq!(
        read(inputs.path(), "final_coordinates_0-based.bed"),
        "0012\t9\t90\tregion_1\n"
    );
}

// =============================================================================
// Empty input
// =============================================================================

#[test]
fn test_no_regions_found_sentinel() {
    let inputs = create_inputs(BOUNDARY_HEADER, "", GENOMAD_HEADER, "");
    let output = run_merger(inputs.path(), &inputs.args());
    assert!(is_success(&output), "No regions found is not an error");

    for name in [
        "all_coordinates.txt",
        "final_coordinates.txt",
        "final_coordinates_0-based.bed",
    ] {
        assert_eq!(read(inputs.path(), name), "NO PROPHAGE REGIONS FOUND\n");
    }
}

// =============================================================================
// Error handling
// =============================================================================

#[test]
fn test_malformed_checkv_header_fails() {
    let inputs = create_inputs(
        &format!("{BOUNDARY_HEADER}chr1\t1\t12\t1\t1200\tchr1||full\n"),
        ">chr1||full_1 1-100\nACGT\n",
        GENOMAD_HEADER,
        VIBRANT_HEADER,
    );
    let output = run_merger(inputs.path(), &inputs.args());

    assert!(!is_success(&output));
    assert!(stderr(&output).contains("'/'"), "stderr: {}", stderr(&output));
    assert!(!inputs.path().join("final_coordinates.txt").exists());
}

#[test]
fn test_unmatched_boundary_key_fails() {
    let inputs = create_inputs(
        &format!("{BOUNDARY_HEADER}chr1\t1\t12\t1\t1200\tchr1||full\n"),
        ">chr9||full_1 1-100/500\nACGT\n",
        GENOMAD_HEADER,
        VIBRANT_HEADER,
    );
    let output = run_merger(inputs.path(), &inputs.args());

    assert!(!is_success(&output));
    assert!(stderr(&output).contains("chr9||full"));
}

#[test]
fn test_inverted_interval_fails() {
    let inputs = create_inputs(
        "",
        "",
        GENOMAD_HEADER,
        &format!("{VIBRANT_HEADER}chr1\tfrag\ta\tb\t1\t900\t100\t0\n"),
    );
    let output = run_merger(inputs.path(), &inputs.args());

    assert!(!is_success(&output));
    assert!(stderr(&output).contains("Invalid interval"));
}

#[test]
fn test_missing_column_fails() {
    let inputs = create_inputs("", "", "seq_name\tstart\tend\n", VIBRANT_HEADER);
    let output = run_merger(inputs.path(), &inputs.args());

    assert!(!is_success(&output));
    assert!(stderr(&output).contains("source_seq"));
}

#[test]
fn test_missing_input_file_fails() {
    let inputs = scenario_inputs();
    let mut args = inputs.args();
    args[7] = inputs.path().join("nope.tsv").display().to_string();

    let output = run_merger(inputs.path(), &args);
    assert!(!is_success(&output));
}
