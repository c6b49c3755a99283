//! Loading run configurations from disk.
//!
//! The text format is whitespace separated: the arena width (integer) and the
//! duration come first, and the rest of the line holding the duration is ignored.
//! Every following non-blank line describes one particle as `name x y vx vy radius`.
//!
//! ```text
//! 100 20.5
//! a 10 50 1 0 1
//! b 90 50 -1 0 1
//! ```

use crate::config::SimConfig;
use crate::core::particle::ParticleState;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Parse a configuration in the text format.
///
/// Only the syntax is checked here; call [`SimConfig::validate`] (or construct a
/// [`Simulation`](crate::core::Simulation)) for the physical checks.
pub fn parse_config(text: &str) -> Result<SimConfig> {
    let mut width: Option<u32> = None;
    let mut duration: Option<f64> = None;
    let mut particles = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let mut tokens = line.split_whitespace();

        if duration.is_none() {
            for token in tokens.by_ref() {
                if width.is_none() {
                    width = Some(token.parse().map_err(|_| Error::Parse {
                        line: line_no,
                        message: format!("invalid arena width '{token}'"),
                    })?);
                } else {
                    duration = Some(parse_real(token, line_no, "duration")?);
                    break;
                }
            }
            continue;
        }

        let Some(name) = tokens.next() else {
            continue;
        };
        let nums = tokens
            .map(|t| parse_real(t, line_no, "particle field"))
            .collect::<Result<Vec<f64>>>()?;
        let &[x, y, vx, vy, radius] = nums.as_slice() else {
            return Err(Error::Parse {
                line: line_no,
                message: format!(
                    "expected 'name x y vx vy radius', got {} numbers",
                    nums.len()
                ),
            });
        };
        particles.push(ParticleState::new(name, x, y, vx, vy, radius));
    }

    let (Some(width), Some(duration)) = (width, duration) else {
        return Err(Error::Parse {
            line: 1,
            message: "missing arena width and duration header".into(),
        });
    };
    log::debug!(
        "parsed config: width {}, duration {}, {} particles",
        width,
        duration,
        particles.len()
    );
    Ok(SimConfig {
        width,
        duration,
        particles,
    })
}

/// Read and parse a text configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<SimConfig> {
    let text = fs::read_to_string(path)?;
    parse_config(&text)
}

/// Read a JSON configuration file (the serde form of [`SimConfig`]).
pub fn load_json_config(path: impl AsRef<Path>) -> Result<SimConfig> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn parse_real(token: &str, line: usize, what: &str) -> Result<f64> {
    token.parse().map_err(|_| Error::Parse {
        line,
        message: format!("invalid {what} '{token}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_particles() -> Result<()> {
        let cfg = parse_config("100 20.5\na 10 50 1 0 1\n\nb 90 50 -1 0 1.5\n")?;
        assert_eq!(cfg.width, 100);
        assert_eq!(cfg.duration, 20.5);
        assert_eq!(cfg.particles.len(), 2);
        assert_eq!(
            cfg.particles[1],
            ParticleState::new("b", 90.0, 50.0, -1.0, 0.0, 1.5)
        );
        Ok(())
    }

    #[test]
    fn header_may_span_lines_and_rest_is_ignored() -> Result<()> {
        let cfg = parse_config("200\n3.5 trailing words\np 1.5 2 0 0 1\n")?;
        assert_eq!(cfg.width, 200);
        assert_eq!(cfg.duration, 3.5);
        assert_eq!(cfg.particles[0].name, "p");
        Ok(())
    }

    #[test]
    fn short_particle_line_is_rejected() {
        match parse_config("100 1\na 1 2 3\n") {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert!(parse_config("wide 1\n").is_err());
        assert!(parse_config("100 1\na x 2 3 4 5\n").is_err());
    }

    #[test]
    fn missing_header_is_rejected() {
        assert!(parse_config("").is_err());
        assert!(parse_config("100\n").is_err());
    }

    #[test]
    fn load_from_file() -> Result<()> {
        let path = std::env::temp_dir().join(format!("partsim-io-{}.txt", std::process::id()));
        fs::write(&path, "50 2\nsolo 25 25 1 1 2\n")?;
        let cfg = load_config(&path)?;
        fs::remove_file(&path)?;
        assert_eq!(cfg.particles.len(), 1);
        assert!(matches!(load_config(&path), Err(Error::Io(_))));
        Ok(())
    }
}
