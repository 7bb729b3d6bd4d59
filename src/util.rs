//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
/// Cuts on a char boundary so accented text never panics the slice.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) {
    end -= 1;
  }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fill_template_replaces_all_occurrences() {
    let out = fill_template("{a} e {b} e {a}", &[("a", "um"), ("b", "dois")]);
    assert_eq!(out, "um e dois e um");
  }

  #[test]
  fn fill_template_leaves_unknown_braces_alone() {
    let out = fill_template("{\"quantidade\": 5, \"tema\": \"{tema}\"}", &[("tema", "Bhaskara")]);
    assert_eq!(out, "{\"quantidade\": 5, \"tema\": \"Bhaskara\"}");
  }

  #[test]
  fn trunc_for_log_respects_char_boundaries() {
    let s = "matemática básica para revisão";
    let out = trunc_for_log(s, 10);
    assert!(out.contains("bytes total"));
    // Must not panic and must keep a valid prefix.
    assert!(s.starts_with(out.split('…').next().unwrap()));
  }

  #[test]
  fn trunc_for_log_passes_short_strings_through() {
    assert_eq!(trunc_for_log("ok", 10), "ok");
  }
}
