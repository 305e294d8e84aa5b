//! Name inflection used to resolve command tokens.
//!
//! A command token such as `migrations.create_table` is split on the first
//! `.` into a plugin prefix and a name. Both halves are camel-cased and joined
//! with a suffix (`Shell` or `Task`) to form the catalog key
//! `Migrations.CreateTableShell`.

/// Suffix for dispatchable shells.
pub const SHELL_SUFFIX: &str = "Shell";

/// Suffix for tasks.
pub const TASK_SUFFIX: &str = "Task";

/// Camel-case a word list separated by `_`, `-` or whitespace.
///
/// Inner capitals of each word are kept, so `camelize("CreateTable")` is
/// unchanged.
pub fn camelize(input: &str) -> String {
    input
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Snake-case a camel-cased or dashed identifier.
pub fn underscore(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev: Option<char> = None;
    let chars: Vec<char> = input.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c.is_whitespace() {
            out.push('_');
        } else if c.is_uppercase() {
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = match prev {
                Some(p) => p.is_lowercase() || p.is_ascii_digit() || (p.is_uppercase() && next_is_lower),
                None => false,
            };
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
        prev = Some(c);
    }

    out
}

/// Split `Plugin.name` into its prefix and name.
pub fn plugin_split(token: &str) -> (Option<&str>, &str) {
    match token.split_once('.') {
        Some((plugin, name)) if !plugin.is_empty() => (Some(plugin), name),
        Some((_, name)) => (None, name),
        None => (None, token),
    }
}

/// Catalog key for a token with the given suffix.
pub fn class_key(token: &str, suffix: &str) -> String {
    let (plugin, name) = plugin_split(token);
    match plugin {
        Some(plugin) => format!("{}.{}{}", camelize(plugin), camelize(name), suffix),
        None => format!("{}{}", camelize(name), suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camelize_snake_case() {
        assert_eq!(camelize("report_weekly"), "ReportWeekly");
        assert_eq!(camelize("build"), "Build");
    }

    #[test]
    fn camelize_dashes() {
        assert_eq!(camelize("unknown-thing"), "UnknownThing");
    }

    #[test]
    fn camelize_keeps_inner_capitals() {
        assert_eq!(camelize("CreateTable"), "CreateTable");
        assert_eq!(camelize("createTable"), "CreateTable");
    }

    #[test]
    fn camelize_empty() {
        assert_eq!(camelize(""), "");
        assert_eq!(camelize("__"), "");
    }

    #[test]
    fn underscore_camel_case() {
        assert_eq!(underscore("ReportWeekly"), "report_weekly");
        assert_eq!(underscore("build"), "build");
        assert_eq!(underscore("HTMLReport"), "html_report");
    }

    #[test]
    fn underscore_dashes() {
        assert_eq!(underscore("unknown-thing"), "unknown_thing");
    }

    #[test]
    fn underscore_leaves_flags_alone() {
        assert_eq!(underscore("--help"), "__help");
        assert_eq!(underscore("weekly"), "weekly");
    }

    #[test]
    fn plugin_split_with_prefix() {
        assert_eq!(plugin_split("Migrations.status"), (Some("Migrations"), "status"));
    }

    #[test]
    fn plugin_split_without_prefix() {
        assert_eq!(plugin_split("status"), (None, "status"));
        assert_eq!(plugin_split(".status"), (None, "status"));
    }

    #[test]
    fn class_key_shell() {
        assert_eq!(class_key("migrations.create_table", SHELL_SUFFIX), "Migrations.CreateTableShell");
        assert_eq!(class_key("command_list", SHELL_SUFFIX), "CommandListShell");
    }

    #[test]
    fn class_key_task() {
        assert_eq!(class_key("Report", TASK_SUFFIX), "ReportTask");
        assert_eq!(class_key("Bake.Model", TASK_SUFFIX), "Bake.ModelTask");
    }
}
