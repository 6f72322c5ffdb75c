//! Structural checks for a loaded taxonomy.

use std::collections::HashSet;

use crate::domain::{DomainError, Level, Section};

/// Check code shapes, per-level uniqueness and the prefix invariants.
///
/// Group codes must start with their division's code and class codes with
/// their group's code. Section codes are compared case-insensitively.
/// The first violation found in tree order is returned.
pub fn validate_sections(sections: &[Section]) -> Result<(), DomainError> {
    let mut seen = SeenCodes::default();

    for section in sections {
        seen.check(Level::Section, &section.code.to_ascii_uppercase())?;

        for division in &section.divisions {
            seen.check(Level::Division, &division.code)?;

            for group in &division.groups {
                seen.check(Level::Group, &group.code)?;
                check_prefix(Level::Group, &group.code, &division.code)?;

                for class in &group.classes {
                    seen.check(Level::Class, &class.code)?;
                    check_prefix(Level::Class, &class.code, &group.code)?;
                }
            }
        }
    }
    Ok(())
}

#[derive(Default)]
struct SeenCodes {
    codes: [HashSet<String>; 4],
}

impl SeenCodes {
    fn check(&mut self, level: Level, code: &str) -> Result<(), DomainError> {
        if !level.accepts(code) {
            return Err(DomainError::InvalidCode {
                level,
                code: code.to_string(),
            });
        }
        if !self.codes[level as usize].insert(code.to_string()) {
            return Err(DomainError::DuplicateCode {
                level,
                code: code.to_string(),
            });
        }
        Ok(())
    }
}

fn check_prefix(level: Level, code: &str, parent: &str) -> Result<(), DomainError> {
    if code.starts_with(parent) {
        Ok(())
    } else {
        Err(DomainError::PrefixMismatch {
            level,
            code: code.to_string(),
            parent: parent.to_string(),
        })
    }
}
