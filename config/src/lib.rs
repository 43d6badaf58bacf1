//! Documentation-site configuration for option-reference aware manuals.
//!
//! The documentation generator consumes these settings verbatim; this crate
//! gives them a typed shape so they can be loaded from YAML or JSON, filled
//! in from build-system placeholders and checked before a build.
//!
//! # Quick start
//!
//! ```no_run
//! use std::collections::BTreeMap;
//! use optref_config::{SiteConfig, on_read_the_docs, validate_config};
//!
//! let template = SiteConfig::load("docs/site.yml").unwrap();
//! let vars = BTreeMap::from([("GAMMU_VERSION".to_string(), "1.42.0".to_string())]);
//! let config = template.substitute(&vars).unwrap();
//!
//! for problem in validate_config(&config) {
//!     eprintln!("{problem}");
//! }
//! println!("theme: {}", config.html.select_theme(on_read_the_docs(), true));
//! for program in config.declared_programs() {
//!     println!("documents program {program}");
//! }
//! ```

mod error;
mod site;
mod validate;

pub use error::{ConfigError, Result};
pub use site::{
    BreatheConfig, EpubConfig, HtmlConfig, LatexConfig, LatexDocument, ManPage, READTHEDOCS_ENV,
    SiteConfig, TexinfoDocument, on_read_the_docs, parse_variable,
};
pub use validate::{MAX_MAN_SECTION, ValidationError, validate_config};
