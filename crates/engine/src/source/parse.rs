//! Line formats for vector and score sources
//!
//! Vector line: `<id>:<f32> <f32> ...` where `<id>` may carry a `user_`
//! prefix (large-dataset user exports).
//!
//! Score line: `<userId>_<movieId>:<score>`.
//!
//! Blank lines are skipped. Everything else must parse or the whole source
//! is rejected.

use marquee_core::{MarqueeError, MarqueeResult};

/// Prefix some user vector exports put in front of numeric ids
const USER_ID_PREFIX: &str = "user_";

/// Parse an entity id, accepting an optional `user_` prefix
pub fn parse_entity_id(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    raw.strip_prefix(USER_ID_PREFIX)
        .unwrap_or(raw)
        .parse::<u32>()
        .ok()
}

/// Parse whitespace-separated vector components
///
/// Rejects empty vectors and non-finite components.
pub fn parse_components(raw: &str) -> Result<Vec<f32>, String> {
    let mut vector = Vec::new();
    for token in raw.split_whitespace() {
        let value: f32 = token
            .parse()
            .map_err(|_| format!("non-numeric component '{}'", token))?;
        if !value.is_finite() {
            return Err(format!("non-finite component '{}'", token));
        }
        vector.push(value);
    }
    if vector.is_empty() {
        return Err("empty vector".to_string());
    }
    Ok(vector)
}

/// Parse a score value
pub fn parse_score(raw: &str) -> Result<f64, String> {
    let raw = raw.trim();
    let score: f64 = raw
        .parse()
        .map_err(|_| format!("non-numeric score '{}'", raw))?;
    if !score.is_finite() {
        return Err(format!("non-finite score '{}'", raw));
    }
    Ok(score)
}

/// Parse a `<userId>_<movieId>` pair key
pub fn parse_pair_key(raw: &str) -> Result<(u32, u32), String> {
    let raw = raw.trim();
    let (user, movie) = raw
        .split_once('_')
        .ok_or_else(|| format!("pair key '{}' is not <userId>_<movieId>", raw))?;
    let user = user
        .parse::<u32>()
        .map_err(|_| format!("invalid user id '{}'", user))?;
    let movie = movie
        .parse::<u32>()
        .map_err(|_| format!("invalid movie id '{}'", movie))?;
    Ok((user, movie))
}

/// Parse every line of a vector source
///
/// All vectors in one source must share a dimension.
pub fn parse_vector_lines(content: &str, source_desc: &str) -> MarqueeResult<Vec<(u32, Vec<f32>)>> {
    let mut out = Vec::new();
    let mut dimension: Option<usize> = None;

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (id, values) = line.split_once(':').ok_or_else(|| {
            MarqueeError::malformed(source_desc, line_no, "expected '<id>:<vector>'")
        })?;
        let id = parse_entity_id(id).ok_or_else(|| {
            MarqueeError::malformed(source_desc, line_no, format!("invalid id '{}'", id.trim()))
        })?;
        let vector =
            parse_components(values).map_err(|reason| MarqueeError::malformed(source_desc, line_no, reason))?;

        match dimension {
            None => dimension = Some(vector.len()),
            Some(dim) if dim != vector.len() => {
                return Err(MarqueeError::DimensionMismatch {
                    source_desc: format!("{} (line {})", source_desc, line_no),
                    expected: dim,
                    actual: vector.len(),
                });
            }
            Some(_) => {}
        }

        out.push((id, vector));
    }

    Ok(out)
}

/// Parse every line of a score source
pub fn parse_score_lines(content: &str, source_desc: &str) -> MarqueeResult<Vec<((u32, u32), f64)>> {
    let mut out = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (key, score) = line.split_once(':').ok_or_else(|| {
            MarqueeError::malformed(source_desc, line_no, "expected '<userId>_<movieId>:<score>'")
        })?;
        let pair =
            parse_pair_key(key).map_err(|reason| MarqueeError::malformed(source_desc, line_no, reason))?;
        let score =
            parse_score(score).map_err(|reason| MarqueeError::malformed(source_desc, line_no, reason))?;
        out.push((pair, score));
    }

    Ok(out)
}
