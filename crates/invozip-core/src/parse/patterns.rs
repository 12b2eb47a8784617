//! Fixed line patterns for the two invoice variants.
//!
//! The Hungarian label literals below (including the legacy `Õ`/`õ`
//! spellings) reproduce the text exactly as the PDF linearizer emits it.
//! Only the unit-of-measure dependent entry grammar is compiled at
//! runtime, see [`crate::parse::entry::EntryParser`].

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Standard header lines
    pub static ref STANDARD_ID: Regex =
        Regex::new(r"^[ ]*Számla sorszáma:([0-9]{10})").unwrap();

    pub static ref STANDARD_ORIGIN_DATE: Regex = Regex::new(
        r"^[ ]*Számla kelte:([0-9]{4}\.[0-9]{2}\.[0-9]{2}|[0-9]{2}\.[0-9]{2}\.[0-9]{4})"
    ).unwrap();

    pub static ref STANDARD_DUE_AND_TOTAL: Regex = Regex::new(
        r"^[ ]*FIZETÉSI HATÁRIDÕ:([0-9]{4}\.[0-9]{2}\.[0-9]{2}|[0-9]{2}\.[0-9]{2}\.[0-9]{4})[ ]+([0-9]+(?:\.[0-9]{3})*)"
    ).unwrap();

    // Credit header lines
    pub static ref CREDIT_ID: Regex =
        Regex::new(r"^[ ]*Helyesbítõ számla sorszáma([0-9]{10})").unwrap();

    pub static ref CREDIT_ORIGIN_DATE: Regex = Regex::new(
        r"^[ ]*Helyesbítõ számla kelte([0-9]{4}\.[0-9]{2}\.[0-9]{2}|[0-9]{2}\.[0-9]{2}\.[0-9]{4})"
    ).unwrap();

    /// A bare invoice serial number, as found below the reference label.
    pub static ref BARE_ID: Regex = Regex::new(r"^[ ]*([0-9]{10})").unwrap();

    /// Grouped integer terminated by a dash, searched (not anchored)
    /// within the line following the credit total label.
    pub static ref TRAILING_DASH_AMOUNT: Regex =
        Regex::new(r"[ ]+([0-9]+(?:\.[0-9]{3})*)-").unwrap();

    /// Product-code prefix that opens a two-line entry.
    pub static ref PRODUCT_CODE: Regex =
        Regex::new(r"^[ ]*([A-Z0-9]{2}[0-9]{4}-[0-9]{3})").unwrap();

    /// The awkward day-first date shape; anything else is parsed
    /// year-first.
    pub static ref DAY_FIRST_DATE: Regex =
        Regex::new(r"^([0-9]{2})\.([0-9]{2})\.([0-9]{4})$").unwrap();
}

/// Title prefix of a credit (corrective) document.
pub const CREDIT_TITLE: &str = "HELYESB";

/// Title prefix of a standard invoice document.
pub const STANDARD_TITLE: &str = "SZÁMLA";

/// Label line preceding the referenced original invoice id.
pub const REFERENCE_LABEL: &str = "Eredeti számla sorszáma";

/// Label line preceding the credit total block.
pub const TOTAL_LABEL: &str = "Adó részletezés";
