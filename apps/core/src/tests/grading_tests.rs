//! Grading Module Tests
//!
//! SGPA/CGPA/percentage properties and record mutation limits.

use crate::grading::{
    cgpa_to_percentage, compute_cgpa, compute_sgpa, AcademicRecord, GradeReport, GradeSettings,
    GradingSystem, NewSubject, PercentageFormula, RecordError, SubjectField, MAX_SUBJECTS_PER_SEMESTER,
    MAX_YEARS,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Record with `years` years; returns it with every semester id in order.
fn record_with_years(years: usize) -> (AcademicRecord, Vec<uuid::Uuid>) {
    let mut record = AcademicRecord::new();
    for _ in 1..years {
        record.add_year().expect("year within limit");
    }
    let ids = record.semesters().map(|s| s.id).collect();
    (record, ids)
}

#[cfg(test)]
mod sgpa_tests {
    use super::*;

    #[test]
    fn test_reference_scenario() {
        let (mut record, sems) = record_with_years(1);
        record.add_subject(sems[0], NewSubject::new("Maths", 4, "A")).unwrap();
        record.add_subject(sems[0], NewSubject::new("English", 2, "B")).unwrap();

        let sgpa = compute_sgpa(record.semester(sems[0]).unwrap(), GradingSystem::TenPoint);
        assert!(approx(sgpa, 44.0 / 6.0), "got {}", sgpa);
        assert!((sgpa - 7.33).abs() < 0.01);
    }

    #[test]
    fn test_no_graded_subjects_gives_zero() {
        let (mut record, sems) = record_with_years(1);
        record.add_subject(sems[0], NewSubject::new("Pending", 4, "")).unwrap();
        record.add_subject(sems[0], NewSubject::new("Audit", 0, "O")).unwrap();

        for system in GradingSystem::ALL {
            assert_eq!(compute_sgpa(record.semester(sems[0]).unwrap(), system), 0.0);
        }
    }

    #[test]
    fn test_zero_credit_subject_contributes_nothing() {
        let (mut record, sems) = record_with_years(1);
        record.add_subject(sems[0], NewSubject::new("Core", 3, "B")).unwrap();
        let before = compute_sgpa(record.semester(sems[0]).unwrap(), GradingSystem::TenPoint);

        record.add_subject(sems[0], NewSubject::new("Seminar", 0, "O")).unwrap();
        let after = compute_sgpa(record.semester(sems[0]).unwrap(), GradingSystem::TenPoint);

        assert_eq!(before, after);
    }

    #[test]
    fn test_unknown_grade_counts_credits_at_zero_points() {
        let (mut record, sems) = record_with_years(1);
        record.add_subject(sems[0], NewSubject::new("Maths", 2, "O")).unwrap();
        record.add_subject(sems[0], NewSubject::new("Odd", 2, "Z")).unwrap();

        let sgpa = compute_sgpa(record.semester(sems[0]).unwrap(), GradingSystem::TenPoint);
        assert!(approx(sgpa, 5.0));
    }

    #[test]
    fn test_switching_grading_system_does_not_mutate_record() {
        let (mut record, sems) = record_with_years(1);
        record.add_subject(sems[0], NewSubject::new("Maths", 3, "A")).unwrap();
        let snapshot = record.clone();

        let ten = compute_sgpa(record.semester(sems[0]).unwrap(), GradingSystem::TenPoint);
        let four = compute_sgpa(record.semester(sems[0]).unwrap(), GradingSystem::FourPoint);
        let inst = compute_sgpa(record.semester(sems[0]).unwrap(), GradingSystem::Institutional);

        assert!(approx(ten, 8.0));
        assert!(approx(four, 4.0));
        assert!(approx(inst, 9.0));
        assert_eq!(record, snapshot);
    }
}

#[cfg(test)]
mod cgpa_tests {
    use super::*;

    #[test]
    fn test_single_graded_semester_equals_its_sgpa() {
        let (mut record, sems) = record_with_years(2);
        record.add_subject(sems[2], NewSubject::new("DS", 4, "A+")).unwrap();
        record.add_subject(sems[2], NewSubject::new("OOP", 3, "B+")).unwrap();

        let sgpa = compute_sgpa(record.semester(sems[2]).unwrap(), GradingSystem::TenPoint);
        let summary = compute_cgpa(&record, GradingSystem::TenPoint);

        assert!(approx(summary.cgpa, sgpa));
        assert_eq!(summary.total_credits, 7);
    }

    #[test]
    fn test_mean_of_sgpas_not_credit_weighted() {
        let (mut record, sems) = record_with_years(1);
        record.add_subject(sems[0], NewSubject::new("A1", 4, "A")).unwrap();
        record.add_subject(sems[0], NewSubject::new("A2", 4, "A")).unwrap();
        record.add_subject(sems[1], NewSubject::new("B1", 1, "B")).unwrap();

        let summary = compute_cgpa(&record, GradingSystem::TenPoint);
        assert!(approx(summary.cgpa, 7.0));
        assert_eq!(summary.total_credits, 9);
    }

    #[test]
    fn test_order_of_years_is_irrelevant() {
        let (mut forward, f) = record_with_years(3);
        forward.add_subject(f[0], NewSubject::new("X", 4, "O")).unwrap();
        forward.add_subject(f[3], NewSubject::new("Y", 3, "B")).unwrap();
        forward.add_subject(f[5], NewSubject::new("Z", 2, "C")).unwrap();

        let mut reversed = forward.clone();
        reversed.years.reverse();
        for year in &mut reversed.years {
            year.semesters.reverse();
        }

        let a = compute_cgpa(&forward, GradingSystem::TenPoint);
        let b = compute_cgpa(&reversed, GradingSystem::TenPoint);
        assert!(approx(a.cgpa, b.cgpa));
        assert_eq!(a.total_credits, b.total_credits);
    }

    #[test]
    fn test_set_then_clear_grade_restores_values() {
        let (mut record, sems) = record_with_years(1);
        record.add_subject(sems[0], NewSubject::new("Maths", 4, "B")).unwrap();
        let subject = record.add_subject(sems[0], NewSubject::new("Physics", 3, "")).unwrap();

        let sgpa_before = compute_sgpa(record.semester(sems[0]).unwrap(), GradingSystem::TenPoint);
        let cgpa_before = compute_cgpa(&record, GradingSystem::TenPoint);

        record
            .update_subject_field(sems[0], subject, SubjectField::Grade("O".to_string()))
            .unwrap();
        assert!(compute_cgpa(&record, GradingSystem::TenPoint).cgpa > cgpa_before.cgpa);

        record
            .update_subject_field(sems[0], subject, SubjectField::Grade(String::new()))
            .unwrap();

        assert_eq!(
            compute_sgpa(record.semester(sems[0]).unwrap(), GradingSystem::TenPoint),
            sgpa_before
        );
        assert_eq!(compute_cgpa(&record, GradingSystem::TenPoint), cgpa_before);
    }

    #[test]
    fn test_removing_last_subject_drops_semester_from_mean() {
        let (mut record, sems) = record_with_years(1);
        record.add_subject(sems[0], NewSubject::new("A", 4, "O")).unwrap();
        let low = record.add_subject(sems[1], NewSubject::new("B", 4, "F")).unwrap();
        assert!(approx(compute_cgpa(&record, GradingSystem::TenPoint).cgpa, 5.0));

        record.remove_subject(sems[1], low).unwrap();
        assert!(approx(compute_cgpa(&record, GradingSystem::TenPoint).cgpa, 10.0));
    }
}

#[cfg(test)]
mod percentage_tests {
    use super::*;

    #[test]
    fn test_zero_cgpa_is_zero_percent() {
        for formula in PercentageFormula::ALL {
            assert_eq!(cgpa_to_percentage(0.0, formula), 0.0);
        }
    }

    #[test]
    fn test_official_ten_is_hundred() {
        assert!(approx(cgpa_to_percentage(10.0, PercentageFormula::Official), 100.0));
    }

    #[test]
    fn test_every_formula_at_eight() {
        let expected = [
            (PercentageFormula::Official, 80.0),
            (PercentageFormula::DirectMultiply, 80.0),
            (PercentageFormula::Offset10Pt, 72.5),
            (PercentageFormula::OffsetAlt, 75.0),
            (PercentageFormula::Scale9_5, 76.0),
            (PercentageFormula::Scale10Offset7_5, 72.5),
        ];
        for (formula, want) in expected {
            let got = cgpa_to_percentage(8.0, formula);
            assert!(approx(got, want), "{} gave {}, expected {}", formula, got, want);
        }
    }

    #[test]
    fn test_never_negative() {
        assert_eq!(cgpa_to_percentage(0.3, PercentageFormula::OffsetAlt), 0.0);
        assert_eq!(cgpa_to_percentage(0.7, PercentageFormula::Scale10Offset7_5), 0.0);
        assert!(cgpa_to_percentage(0.3, PercentageFormula::Official) > 0.0);
    }
}

#[cfg(test)]
mod record_limit_tests {
    use super::*;

    #[test]
    fn test_fifth_year_rejected() {
        let (mut record, _) = record_with_years(MAX_YEARS);
        assert_eq!(record.years.len(), 4);

        assert_eq!(
            record.add_year(),
            Err(RecordError::YearLimitReached { max: MAX_YEARS })
        );
        assert_eq!(record.years.len(), 4);
    }

    #[test]
    fn test_eleventh_subject_rejected() {
        let (mut record, sems) = record_with_years(1);
        for i in 0..MAX_SUBJECTS_PER_SEMESTER {
            record
                .add_subject(sems[1], NewSubject::new(format!("S{}", i), 2, "B"))
                .unwrap();
        }

        let err = record
            .add_subject(sems[1], NewSubject::new("S10", 2, "B"))
            .unwrap_err();
        assert_eq!(err, RecordError::SubjectLimitReached { max: 10 });
        assert_eq!(record.semester(sems[1]).unwrap().subjects.len(), 10);

        // the sibling semester is unaffected
        assert!(record.add_subject(sems[0], NewSubject::new("S0", 2, "B")).is_ok());
    }

    #[test]
    fn test_snapshot_limits_checked() {
        let (mut record, _) = record_with_years(MAX_YEARS);
        assert!(record.check_limits().is_ok());

        record.years.push(record.years[0].clone());
        assert_eq!(
            record.check_limits(),
            Err(RecordError::YearLimitReached { max: MAX_YEARS })
        );
    }

    #[test]
    fn test_record_json_round_trip_keeps_results() {
        let (mut record, sems) = record_with_years(2);
        record.add_subject(sems[1], NewSubject::new("Maths", 4, "A")).unwrap();
        record.add_subject(sems[3], NewSubject::new("DBMS", 3, "O")).unwrap();

        let json = serde_json::to_string(&record).unwrap();
        let restored: AcademicRecord = serde_json::from_str(&json).unwrap();

        let settings = GradeSettings::default();
        assert_eq!(
            GradeReport::build(&record, settings),
            GradeReport::build(&restored, settings)
        );
    }
}
