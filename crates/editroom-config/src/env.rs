use std::sync::OnceLock;

use regex::Regex;

/// Expand `{{ env.VAR }}` placeholders in a raw TOML string
///
/// An optional fallback can be supplied with
/// `{{ env.VAR | default("fallback") }}`; without one, a missing variable is
/// an error. Expansion happens on the raw text before deserialization so the
/// config structs stay plain `String`/`SecretString`. Comment lines are left
/// untouched.
pub fn expand_env(input: &str) -> Result<String, String> {
    fn placeholder() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        // Group 1: scoped key (e.g. `env.APP_KEY`), group 2: optional default
        RE.get_or_init(|| {
            Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
                .expect("must be valid regex")
        })
    }

    let mut output = String::with_capacity(input.len());

    for (i, line) in input.lines().enumerate() {
        if i > 0 {
            output.push('\n');
        }

        if line.trim_start().starts_with('#') {
            output.push_str(line);
            continue;
        }

        let mut last_end = 0;
        for captures in placeholder().captures_iter(line) {
            let matched = captures.get(0).expect("capture 0 always present");
            output.push_str(&line[last_end..matched.start()]);

            let key = captures.get(1).expect("key group is mandatory").as_str();
            let var_name = key
                .strip_prefix("env.")
                .filter(|rest| !rest.contains('.'))
                .ok_or_else(|| format!("only variables scoped with 'env.' are supported: `{key}`"))?;

            match std::env::var(var_name) {
                Ok(value) => output.push_str(&value),
                Err(_) => match captures.get(2) {
                    Some(default) => output.push_str(default.as_str()),
                    None => return Err(format!("environment variable not found: `{var_name}`")),
                },
            }

            last_end = matched.end();
        }
        output.push_str(&line[last_end..]);
    }

    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}
