//! Media-query condition evaluation.
//!
//! Boolean-only contract: unknown features, unknown media types, and
//! unparsable lengths evaluate to false rather than erroring, matching how
//! browsers treat unrecognized conditions.

#[derive(Clone, Copy, Debug)]
pub struct MediaEnv {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Root font size used for `em`/`rem` lengths in conditions. The caller
    /// forces this to 16 while resolving the root element itself.
    pub root_font_size: f32,
}

/// Evaluate a comma-separated media query list: true when any query matches.
pub fn media_matches(condition: &str, env: &MediaEnv) -> bool {
    let condition = condition.trim();
    if condition.is_empty() {
        return true;
    }
    condition.split(',').any(|query| query_matches(query.trim(), env))
}

fn query_matches(query: &str, env: &MediaEnv) -> bool {
    if query.is_empty() {
        return false;
    }
    let (negated, rest) = match query.split_whitespace().next() {
        Some(first) if first.eq_ignore_ascii_case("not") => (true, query[first.len()..].trim_start()),
        _ => (false, query),
    };
    let mut matched = true;
    for part in split_parts(rest) {
        if !part_matches(part, env) {
            matched = false;
            break;
        }
    }
    negated != matched
}

/// Split a query into its `and`-separated parts: parenthesized features and
/// bare media-type idents. The `only` prefix is ignored.
fn split_parts(query: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = None;
    for (i, c) in query.char_indices() {
        match c {
            '(' => {
                if depth == 0 && start.is_none() {
                    start = Some(i);
                }
                depth += 1;
            }
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if let Some(s) = start.take() {
                        parts.push(&query[s..=i]);
                    }
                }
            }
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    parts.push(&query[s..i]);
                }
            }
            _ => {
                if depth == 0 && start.is_none() {
                    start = Some(i);
                }
            }
        }
    }
    if let Some(s) = start {
        parts.push(&query[s..]);
    }
    parts
        .into_iter()
        .filter(|p| !p.eq_ignore_ascii_case("and") && !p.eq_ignore_ascii_case("only"))
        .collect()
}

fn part_matches(part: &str, env: &MediaEnv) -> bool {
    if let Some(inner) = part.strip_prefix('(').and_then(|p| p.strip_suffix(')')) {
        return feature_matches(inner.trim(), env);
    }
    match part.to_ascii_lowercase().as_str() {
        "all" | "screen" => true,
        _ => false,
    }
}

fn feature_matches(feature: &str, env: &MediaEnv) -> bool {
    let Some((name, value)) = feature.split_once(':') else {
        return false;
    };
    let name = name.trim().to_ascii_lowercase();
    let value = value.trim();
    match name.as_str() {
        "min-width" => length(value, env).is_some_and(|len| env.viewport_width >= len),
        "max-width" => length(value, env).is_some_and(|len| env.viewport_width <= len),
        "min-height" => length(value, env).is_some_and(|len| env.viewport_height >= len),
        "max-height" => length(value, env).is_some_and(|len| env.viewport_height <= len),
        "width" => length(value, env).is_some_and(|len| (env.viewport_width - len).abs() < f32::EPSILON),
        "height" => length(value, env).is_some_and(|len| (env.viewport_height - len).abs() < f32::EPSILON),
        "orientation" => {
            let landscape = env.viewport_width >= env.viewport_height;
            match value.to_ascii_lowercase().as_str() {
                "landscape" => landscape,
                "portrait" => !landscape,
                _ => false,
            }
        }
        _ => false,
    }
}

fn length(value: &str, env: &MediaEnv) -> Option<f32> {
    let value = value.trim();
    if let Some(px) = value.strip_suffix("px") {
        return px.trim().parse().ok();
    }
    if let Some(rem) = value.strip_suffix("rem") {
        return rem.trim().parse::<f32>().ok().map(|n| n * env.root_font_size);
    }
    if let Some(em) = value.strip_suffix("em") {
        return em.trim().parse::<f32>().ok().map(|n| n * env.root_font_size);
    }
    value.parse().ok()
}
