use std::collections::HashMap;

use rust_xlsxwriter::*;
use uuid::Uuid;

use crate::error::Result;
use crate::models::candidate::Candidate;
use crate::utils::time::{export_timestamp, now};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub struct ExportService;

impl ExportService {
    /// Builds a workbook with one row per application. `job_titles` maps
    /// job ids to titles for the first column.
    pub fn generate_candidates_xlsx(
        candidates: &[Candidate],
        job_titles: &HashMap<Uuid, String>,
    ) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Candidates")?;

        let header_bg = Color::RGB(0x0F172A);
        let alt_row = Color::RGB(0xF8FAFC);
        let border_color = Color::RGB(0xE2E8F0);

        let columns = [
            ("Job", 28.0),
            ("First Name", 16.0),
            ("Last Name", 16.0),
            ("Email", 30.0),
            ("Mobile", 14.0),
            ("Alternate Contact", 16.0),
            ("Education", 28.0),
            ("Academic Performance", 18.0),
            ("Current Company", 22.0),
            ("Designation", 20.0),
            ("Total Experience", 14.0),
            ("Relevant Experience", 16.0),
            ("Primary Skills", 28.0),
            ("Resume", 36.0),
            ("Video", 36.0),
            ("Referred By", 18.0),
            ("Submitted At", 20.0),
        ];

        for (i, (_, width)) in columns.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }

        let title_format = Format::new()
            .set_font_size(14)
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(header_bg)
            .set_align(FormatAlign::VerticalCenter);
        worksheet.set_row_height(0, 30)?;
        let title = format!(
            "Applications exported {} UTC ({} total)",
            export_timestamp(now()),
            candidates.len()
        );
        worksheet.merge_range(0, 0, 0, (columns.len() - 1) as u16, &title, &title_format)?;

        let header_format = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(Color::White)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_text_wrap()
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);
        let header_row = 1;
        for (i, (name, _)) in columns.iter().enumerate() {
            worksheet.write_string_with_format(header_row, i as u16, *name, &header_format)?;
        }
        worksheet.set_freeze_panes(2, 0)?;

        for (idx, candidate) in candidates.iter().enumerate() {
            let row = header_row + 1 + idx as u32;
            let mut cell = Format::new()
                .set_font_size(10)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            if idx % 2 == 0 {
                cell = cell.set_background_color(alt_row);
            }
            let number = cell.clone().set_num_format("0.0");

            let job = job_titles
                .get(&candidate.job_id)
                .map(String::as_str)
                .unwrap_or("-");
            let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

            let text_cells = [
                (0, job.to_string()),
                (1, candidate.first_name.clone()),
                (2, candidate.last_name.clone()),
                (3, candidate.personal_email.clone()),
                (4, candidate.mobile_no.clone()),
                (5, optional(&candidate.alternate_contact_no)),
                (6, candidate.highest_educational_qualifications.clone()),
                (7, candidate.academic_performance.clone()),
                (8, optional(&candidate.current_company)),
                (9, optional(&candidate.current_designation)),
                (12, candidate.primary_skills.clone()),
                (13, candidate.resume_attachments.clone()),
                (14, optional(&candidate.self_introduction_video)),
                (15, optional(&candidate.referred_by)),
                (16, export_timestamp(candidate.submitted_at)),
            ];
            for (col, value) in text_cells {
                worksheet.write_string_with_format(row, col, &value, &cell)?;
            }
            worksheet.write_number_with_format(row, 10, candidate.total_experience, &number)?;
            worksheet.write_number_with_format(row, 11, candidate.relevant_experience, &number)?;
        }

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }

    pub fn file_name() -> String {
        format!("candidates_{}.xlsx", now().format("%Y%m%d_%H%M%S"))
    }
}
