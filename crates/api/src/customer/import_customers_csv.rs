use super::import_customers::ImportCustomersUseCase;
use crate::{
    error::TrackerError,
    shared::{auth::protect_admin_route, usecase::execute},
};
use actix_web::{web, HttpRequest, HttpResponse};
use csv::{ReaderBuilder, StringRecord, Trim};
use renewal_tracker_api_structs::import_customers::{CcEmails, ImportRow};
use renewal_tracker_domain::split_email_list;
use renewal_tracker_infra::TrackerContext;
use thiserror::Error;

pub async fn import_customers_csv_controller(
    http_req: HttpRequest,
    body: String,
    ctx: web::Data<TrackerContext>,
) -> Result<HttpResponse, TrackerError> {
    protect_admin_route(&http_req, &ctx)?;

    let rows = parse_import_csv(&body).map_err(|e| TrackerError::BadClientData(e.to_string()))?;
    let usecase = ImportCustomersUseCase { rows };
    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(res))
        .map_err(TrackerError::from)
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidImportCsv {
    #[error("Failed to read CSV headers: {0}")]
    Headers(String),
    #[error("Missing required column: `{0}`")]
    MissingColumn(&'static str),
    #[error("Row {row}: CSV parse error: {message}")]
    Malformed { row: usize, message: String },
    #[error("Row {row}: invalid paused value: `{value}`")]
    Paused { row: usize, value: String },
}

/// Column positions resolved from the header row
struct Columns {
    company_name: Option<usize>,
    contact_name: Option<usize>,
    primary_email: usize,
    cc_emails: Option<usize>,
    plan_name: Option<usize>,
    renew_link: Option<usize>,
    expires_on: usize,
    paused: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, InvalidImportCsv> {
        let headers = headers
            .iter()
            .map(|h| h.to_lowercase())
            .collect::<Vec<_>>();
        let find = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| headers.iter().position(|h| h == name))
        };

        Ok(Self {
            company_name: find(&["company_name", "company"]),
            contact_name: find(&["contact_name", "contact"]),
            primary_email: find(&["primary_email", "email"])
                .ok_or(InvalidImportCsv::MissingColumn("primary_email"))?,
            cc_emails: find(&["cc_emails", "cc"]),
            plan_name: find(&["plan_name", "plan"]),
            renew_link: find(&["renew_link", "link"]),
            expires_on: find(&["expires_on", "expires"])
                .ok_or(InvalidImportCsv::MissingColumn("expires_on"))?,
            paused: find(&["paused"]),
        })
    }
}

fn cell(record: &StringRecord, column: Option<usize>) -> Option<String> {
    column
        .and_then(|i| record.get(i))
        .filter(|value| !value.is_empty())
        .map(String::from)
}

fn parse_paused(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Some(true),
        "false" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// Parses a CSV export with a header row into import rows. Column names are
/// case insensitive and cc emails within a cell are separated by `;`.
pub fn parse_import_csv(text: &str) -> Result<Vec<ImportRow>, InvalidImportCsv> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| InvalidImportCsv::Headers(e.to_string()))?
        .clone();
    let columns = Columns::resolve(&headers)?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let row = i + 1;
        let record = record.map_err(|e| InvalidImportCsv::Malformed {
            row,
            message: e.to_string(),
        })?;
        if record.iter().all(|value| value.is_empty()) {
            continue;
        }

        let paused = match cell(&record, columns.paused) {
            Some(value) => Some(
                parse_paused(&value).ok_or(InvalidImportCsv::Paused { row, value })?,
            ),
            None => None,
        };

        rows.push(ImportRow {
            company_name: cell(&record, columns.company_name),
            contact_name: cell(&record, columns.contact_name),
            primary_email: cell(&record, Some(columns.primary_email)).unwrap_or_default(),
            cc_emails: cell(&record, columns.cc_emails)
                .map(|emails| CcEmails::List(split_email_list(&emails))),
            plan_name: cell(&record, columns.plan_name),
            renew_link: cell(&record, columns.renew_link),
            expires_on: cell(&record, Some(columns.expires_on)).unwrap_or_default(),
            paused,
        });
    }

    Ok(rows)
}
