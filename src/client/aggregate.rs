//! Service list parsing and composite disponibility
//!
//! The URL list is line-oriented: the first line holds the service count,
//! each following line one URL. The composite score is the product of all
//! successfully retrieved readings; services that failed contribute no
//! factor, and with zero responders the composite is undefined rather than
//! 0 or 1.

use thiserror::Error;

use crate::client::ServiceReading;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceListError {
    #[error("service list is empty")]
    Empty,
    #[error("service list must start with a service count")]
    InvalidCount,
    #[error("service list declares {expected} services but contains {found}")]
    TooFewUrls { expected: usize, found: usize },
}

pub fn parse_service_list(contents: &str) -> Result<Vec<String>, ServiceListError> {
    let mut lines = contents.lines();
    let first = lines.next().ok_or(ServiceListError::Empty)?;
    let expected: usize = first
        .trim()
        .parse()
        .map_err(|_| ServiceListError::InvalidCount)?;

    let urls: Vec<String> = lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(expected)
        .map(str::to_string)
        .collect();

    if urls.len() < expected {
        return Err(ServiceListError::TooFewUrls {
            expected,
            found: urls.len(),
        });
    }

    Ok(urls)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    pub responded: usize,
    pub total: usize,
    /// `None` when no service responded: the composite cannot be calculated.
    pub disponibility: Option<f64>,
}

pub fn composite(readings: &[ServiceReading], total: usize) -> Composite {
    let disponibility = if readings.is_empty() {
        None
    } else {
        Some(
            readings
                .iter()
                .map(|reading| reading.disponibility)
                .product(),
        )
    };

    Composite {
        responded: readings.len(),
        total,
        disponibility,
    }
}
