//! CSV export of the full registration list.

use chrono::NaiveDate;
use shared::domain::Registration;

pub const CSV_HEADERS: [&str; 9] = [
    "Full Name",
    "Last Name",
    "Date of Birth",
    "Major",
    "Department",
    "Campus",
    "Programming Knowledge",
    "Goals",
    "Registration Date",
];

/// Download filename with the export date embedded.
pub fn csv_filename(today: NaiveDate) -> String {
    format!("urex-registrations-{}.csv", today.format("%Y-%m-%d"))
}

/// Serializes every record (any view filter or sort is ignored) as a
/// header row plus one row per record. Fields are double-quote-wrapped
/// and comma-joined; embedded quotes are doubled so quoted free text
/// stays parseable. Not full RFC 4180.
pub fn to_csv(rows: &[Registration]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        CSV_HEADERS
            .iter()
            .map(|h| quote(h))
            .collect::<Vec<_>>()
            .join(","),
    );

    for row in rows {
        let fields = [
            row.full_name.as_str(),
            row.last_name.as_str(),
            row.date_of_birth.as_str(),
            row.major.as_str(),
            row.department.as_str(),
            row.campus.as_str(),
            row.programming_knowledge.as_str(),
            row.programming_goals.as_str(),
            &row.created_at.format("%m/%d/%Y").to_string(),
        ];
        lines.push(fields.map(quote).join(","));
    }

    lines.join("\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use shared::domain::RegistrationId;
    use uuid::Uuid;

    use super::*;

    fn reg(full_name: &str, knowledge: &str) -> Registration {
        Registration {
            id: RegistrationId(Uuid::new_v4()),
            full_name: full_name.into(),
            last_name: "Haddad".into(),
            date_of_birth: "2004-05-11".into(),
            major: "CS".into(),
            department: "Informatics".into(),
            campus: "Main".into(),
            programming_knowledge: knowledge.into(),
            programming_goals: "Build an app".into(),
            created_at: Utc.with_ymd_and_hms(2026, 8, 20, 10, 30, 0).unwrap(),
        }
    }

    #[test]
    fn header_row_lists_all_columns_in_order() {
        let csv = to_csv(&[]);
        assert_eq!(
            csv,
            "\"Full Name\",\"Last Name\",\"Date of Birth\",\"Major\",\"Department\",\
             \"Campus\",\"Programming Knowledge\",\"Goals\",\"Registration Date\""
        );
    }

    #[test]
    fn rows_are_quoted_and_dated() {
        let csv = to_csv(&[reg("Lina", "Beginner")]);
        let row = csv.lines().nth(1).expect("data row");
        assert_eq!(
            row,
            "\"Lina\",\"Haddad\",\"2004-05-11\",\"CS\",\"Informatics\",\"Main\",\
             \"Beginner\",\"Build an app\",\"08/20/2026\""
        );
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let csv = to_csv(&[reg("Lina", "I know \"C\", a bit")]);
        assert!(csv.contains("\"I know \"\"C\"\", a bit\""));
    }

    #[test]
    fn commas_in_free_text_stay_inside_the_quoted_field() {
        let csv = to_csv(&[reg("Lina", "HTML, CSS, JS")]);
        let row = csv.lines().nth(1).expect("data row");
        assert!(row.contains("\"HTML, CSS, JS\""));
    }

    #[test]
    fn filename_embeds_the_export_date() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 30).expect("date");
        assert_eq!(csv_filename(date), "urex-registrations-2026-08-30.csv");
    }
}
