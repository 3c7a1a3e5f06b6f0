//! End-to-end validation runs over on-disk submission fixtures.

use std::fs;
use std::path::Path;

use relint_engine::{ValidationConfig, render_report_json, validate_submission};
use relint_ingest::SubmissionLayout;
use relint_model::{ErrorKind, FileType, KeyTuple};

struct Fixture {
    original: tempfile::TempDir,
    new: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        Fixture {
            original: tempfile::tempdir().unwrap(),
            new: tempfile::tempdir().unwrap(),
        }
    }

    fn write(&self, dir: &Path, name: &str, lines: &[&str]) {
        let mut contents = String::new();
        for line in lines {
            contents.push_str(line);
            contents.push('\n');
        }
        fs::write(dir.join(name), contents).unwrap();
    }

    fn original_file(&self, name: &str, lines: &[&str]) {
        self.write(self.original.path(), name, lines);
    }

    fn new_file(&self, name: &str, lines: &[&str]) {
        self.write(self.new.path(), name, lines);
    }

    fn config(&self) -> ValidationConfig {
        ValidationConfig::new(SubmissionLayout::new(
            self.original.path(),
            self.new.path(),
        ))
    }
}

const DONOR_HEADER: &str = "donor_id\tdonor_sex";
const SPECIMEN_HEADER: &str = "donor_id\tspecimen_id";
const SAMPLE_HEADER: &str = "analyzed_sample_id\tspecimen_id";
const SSM_M_HEADER: &str = "analysis_id\tanalyzed_sample_id\tmatched_sample_id";
const SSM_P_HEADER: &str = "analysis_id\tanalyzed_sample_id\tchromosome";
const CNSM_M_HEADER: &str = "analysis_id\tanalyzed_sample_id\tmatched_sample_id";

#[test]
fn empty_submission_is_valid() {
    let fixture = Fixture::new();
    let outcome = validate_submission(&fixture.config()).unwrap();
    assert!(outcome.is_valid);
    assert_eq!(outcome.report.total(), 0);
}

#[test]
fn clean_end_to_end_submission_is_valid() {
    let fixture = Fixture::new();
    fixture.original_file("donor.txt", &[DONOR_HEADER, "D1\tmale"]);
    fixture.new_file("donor.txt", &[DONOR_HEADER]);
    fixture.new_file("specimen.txt", &[SPECIMEN_HEADER, "D1\tS1"]);
    fixture.new_file("sample.txt", &[SAMPLE_HEADER, "A1\tS1"]);
    // Self-referential matched sample: tumour and control share an id.
    fixture.new_file("ssm_m.txt", &[SSM_M_HEADER, "AN1\tA1\tA1"]);
    fixture.new_file("ssm_p.txt", &[SSM_P_HEADER, "AN1\tA1\t7"]);

    let outcome = validate_submission(&fixture.config()).unwrap();
    assert!(outcome.is_valid, "report: {:?}", outcome.report);
}

#[test]
fn duplicate_new_pk_reports_the_second_occurrence_only() {
    let fixture = Fixture::new();
    fixture.new_file("donor.txt", &[DONOR_HEADER, "D1\tmale", "D1\tfemale"]);

    let outcome = validate_submission(&fixture.config()).unwrap();
    let errors = outcome.report.errors_for(FileType::Donor);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::UniqueNew);
    assert_eq!(errors[0].line_number, Some(3));
    assert_eq!(errors[0].key, KeyTuple::from(["D1"]));
}

#[test]
fn new_pk_colliding_with_the_baseline_is_unique_original() {
    let fixture = Fixture::new();
    fixture.original_file("donor.txt", &[DONOR_HEADER, "D1\tmale"]);
    fixture.new_file("donor.txt", &[DONOR_HEADER, "D1\tmale", "D2\tfemale"]);

    let outcome = validate_submission(&fixture.config()).unwrap();
    let errors = outcome.report.errors_for(FileType::Donor);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::UniqueOriginal);
    assert_eq!(errors[0].line_number, Some(2));
}

#[test]
fn unresolved_fk_is_a_relation_error_without_surjection_credit() {
    let fixture = Fixture::new();
    fixture.original_file("donor.txt", &[DONOR_HEADER, "D1\tmale"]);
    fixture.new_file("donor.txt", &[DONOR_HEADER]);
    fixture.new_file("specimen.txt", &[SPECIMEN_HEADER, "D9\tS1"]);

    let outcome = validate_submission(&fixture.config()).unwrap();
    let errors = outcome.report.errors_for(FileType::Specimen);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::Relation);
    assert_eq!(errors[0].line_number, Some(2));
    assert_eq!(errors[0].key, KeyTuple::from(["D9"]));
}

#[test]
fn baseline_donor_referenced_by_new_specimen_satisfies_surjectivity() {
    let fixture = Fixture::new();
    fixture.original_file("donor.txt", &[DONOR_HEADER, "D1\tmale"]);
    fixture.new_file("specimen.txt", &[SPECIMEN_HEADER, "D1\tS1"]);
    fixture.new_file("sample.txt", &[SAMPLE_HEADER, "A1\tS1"]);
    fixture.new_file("ssm_m.txt", &[SSM_M_HEADER, "AN1\tA1\t-888"]);

    let outcome = validate_submission(&fixture.config()).unwrap();
    assert!(outcome.is_valid, "report: {:?}", outcome.report);
}

#[test]
fn unreferenced_baseline_donor_is_a_surjection_error() {
    let fixture = Fixture::new();
    fixture.original_file("donor.txt", &[DONOR_HEADER, "D1\tmale"]);
    fixture.new_file("specimen.txt", &[SPECIMEN_HEADER]);

    let outcome = validate_submission(&fixture.config()).unwrap();
    let errors = outcome.report.errors_for(FileType::Donor);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::Surjection);
    assert_eq!(errors[0].key, KeyTuple::from(["D1"]));
    assert_eq!(errors[0].line_number, None);
}

#[test]
fn sibling_meta_files_jointly_cover_the_sample_digest() {
    let fixture = Fixture::new();
    fixture.new_file("donor.txt", &[DONOR_HEADER, "D1\tmale"]);
    fixture.new_file("specimen.txt", &[SPECIMEN_HEADER, "D1\tS1"]);
    fixture.new_file("sample.txt", &[SAMPLE_HEADER, "A1\tS1", "A2\tS1"]);
    fixture.new_file("ssm_m.txt", &[SSM_M_HEADER, "AN1\tA1\t-888"]);
    fixture.new_file("cnsm_m.txt", &[CNSM_M_HEADER, "AN2\tA2\t-888"]);

    let outcome = validate_submission(&fixture.config()).unwrap();
    assert!(outcome.is_valid, "report: {:?}", outcome.report);
}

#[test]
fn sample_covered_by_neither_meta_file_is_a_surjection_error() {
    let fixture = Fixture::new();
    fixture.new_file("donor.txt", &[DONOR_HEADER, "D1\tmale"]);
    fixture.new_file("specimen.txt", &[SPECIMEN_HEADER, "D1\tS1"]);
    fixture.new_file("sample.txt", &[SAMPLE_HEADER, "A1\tS1", "A2\tS1"]);
    fixture.new_file("ssm_m.txt", &[SSM_M_HEADER, "AN1\tA1\t-888"]);

    let outcome = validate_submission(&fixture.config()).unwrap();
    let errors = outcome.report.errors_for(FileType::Sample);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::Surjection);
    assert_eq!(errors[0].key, KeyTuple::from(["A2"]));
}

#[test]
fn unresolved_matched_sample_is_a_secondary_relation_error() {
    let fixture = Fixture::new();
    fixture.new_file("donor.txt", &[DONOR_HEADER, "D1\tmale"]);
    fixture.new_file("specimen.txt", &[SPECIMEN_HEADER, "D1\tS1"]);
    fixture.new_file("sample.txt", &[SAMPLE_HEADER, "A1\tS1"]);
    fixture.new_file("ssm_m.txt", &[SSM_M_HEADER, "AN1\tA1\tX9"]);

    let outcome = validate_submission(&fixture.config()).unwrap();
    let errors = outcome.report.errors_for(FileType::SsmM);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::SecondaryRelation);
    assert_eq!(errors[0].key, KeyTuple::from(["X9"]));
}

#[test]
fn offending_rows_are_excluded_from_surjection_credit() {
    // The only specimen row fails its FK check, so the baseline donor goes
    // unreferenced too.
    let fixture = Fixture::new();
    fixture.original_file("donor.txt", &[DONOR_HEADER, "D1\tmale"]);
    fixture.new_file("specimen.txt", &[SPECIMEN_HEADER, "D9\tS1"]);

    let outcome = validate_submission(&fixture.config()).unwrap();
    assert_eq!(outcome.report.errors_for(FileType::Specimen).len(), 1);
    let donor_errors = outcome.report.errors_for(FileType::Donor);
    assert_eq!(donor_errors.len(), 1);
    assert_eq!(donor_errors[0].kind, ErrorKind::Surjection);
}

#[test]
fn rerunning_identical_inputs_renders_an_identical_report() {
    let fixture = Fixture::new();
    fixture.original_file("donor.txt", &[DONOR_HEADER, "D1\tmale"]);
    fixture.new_file("donor.txt", &[DONOR_HEADER, "D1\tmale", "D2\tf", "D2\tf"]);
    fixture.new_file("specimen.txt", &[SPECIMEN_HEADER, "D9\tS1"]);

    let first = validate_submission(&fixture.config()).unwrap();
    let second = validate_submission(&fixture.config()).unwrap();
    assert_eq!(
        render_report_json(&first.report).unwrap(),
        render_report_json(&second.report).unwrap()
    );
}

#[test]
fn deletion_list_problems_are_recorded_but_do_not_abort() {
    let fixture = Fixture::new();
    fixture.original_file("donor.txt", &[DONOR_HEADER, "D1\tmale"]);
    fixture.new_file(
        "to_be_removed.txt",
        &["donor_id\ttypes", "D9\tall"], // unknown donor
    );
    fixture.new_file("specimen.txt", &[SPECIMEN_HEADER, "D1\tS1"]);
    fixture.new_file("sample.txt", &[SAMPLE_HEADER, "A1\tS1"]);
    fixture.new_file("ssm_m.txt", &[SSM_M_HEADER, "AN1\tA1\t-888"]);

    let outcome = validate_submission(&fixture.config()).unwrap();
    assert!(!outcome.is_valid);
    let errors = outcome.report.errors_for(FileType::Donor);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::WellFormedness);
    assert_eq!(errors[0].key, KeyTuple::from(["D9"]));
}

#[test]
fn deleted_donor_resubmission_skips_the_baseline_uniqueness_check() {
    let fixture = Fixture::new();
    fixture.original_file("donor.txt", &[DONOR_HEADER, "D1\tmale"]);
    fixture.new_file("to_be_removed.txt", &["donor_id\ttypes", "D1\tall"]);
    fixture.new_file("donor.txt", &[DONOR_HEADER, "D1\tmale"]);

    let outcome = validate_submission(&fixture.config()).unwrap();
    let errors = outcome.report.errors_for(FileType::Donor);
    // The overlay flags the resubmission-while-deleted inconsistency, but
    // no UNIQUE_ORIGINAL error is raised for the exempted donor.
    assert!(errors.iter().all(|e| e.kind == ErrorKind::WellFormedness));
    assert!(
        !errors
            .iter()
            .any(|e| e.kind == ErrorKind::UniqueOriginal)
    );
}

#[test]
fn missing_submission_directory_is_fatal() {
    let original = tempfile::tempdir().unwrap();
    let layout = SubmissionLayout::new(original.path(), original.path().join("missing"));
    let config = ValidationConfig::new(layout);
    assert!(validate_submission(&config).is_err());
}

#[test]
fn header_narrower_than_the_declared_keys_is_fatal() {
    let fixture = Fixture::new();
    fixture.new_file("specimen.txt", &["donor_id", "D1"]);
    assert!(validate_submission(&fixture.config()).is_err());
}
