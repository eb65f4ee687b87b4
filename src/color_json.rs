//! Purpose: Render pretty JSON with optional ANSI colorization for CLI output.
//! Exports: colorize_json.
//! Role: Small, pure formatter used by CLI emission paths.
//! Invariants: When color is disabled, output equals serde_json::to_string_pretty.
//! Invariants: ANSI escapes appear only when explicitly enabled.
use serde_json::Value;

const INDENT: &str = "  ";

// Conservative 8/16-color palette for broad terminal compatibility.
#[derive(Copy, Clone)]
enum Tone {
    Key,
    Str,
    Num,
    Bool,
    Null,
    Punct,
}

impl Tone {
    fn code(self) -> &'static str {
        match self {
            Tone::Key => "36",
            Tone::Str => "32",
            Tone::Num => "33",
            Tone::Bool => "35",
            Tone::Null | Tone::Punct => "39",
        }
    }
}

pub fn colorize_json(value: &Value, use_color: bool) -> String {
    let mut renderer = Renderer {
        use_color,
        out: String::new(),
    };
    renderer.value(value, 0);
    renderer.out
}

struct Renderer {
    use_color: bool,
    out: String,
}

impl Renderer {
    fn value(&mut self, value: &Value, indent: usize) {
        match value {
            Value::Null => self.colored("null", Tone::Null),
            Value::Bool(val) => {
                let text = if *val { "true" } else { "false" };
                self.colored(text, Tone::Bool);
            }
            Value::Number(num) => self.colored(&num.to_string(), Tone::Num),
            Value::String(text) => {
                let encoded = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
                self.colored(&encoded, Tone::Str);
            }
            Value::Array(items) => self.array(items, indent),
            Value::Object(map) => self.object(map, indent),
        }
    }

    fn array(&mut self, items: &[Value], indent: usize) {
        if items.is_empty() {
            self.colored("[]", Tone::Punct);
            return;
        }
        self.colored("[", Tone::Punct);
        self.out.push('\n');
        for (idx, item) in items.iter().enumerate() {
            self.pad(indent + 1);
            self.value(item, indent + 1);
            if idx + 1 < items.len() {
                self.colored(",", Tone::Punct);
            }
            self.out.push('\n');
        }
        self.pad(indent);
        self.colored("]", Tone::Punct);
    }

    fn object(&mut self, map: &serde_json::Map<String, Value>, indent: usize) {
        if map.is_empty() {
            self.colored("{}", Tone::Punct);
            return;
        }
        self.colored("{", Tone::Punct);
        self.out.push('\n');
        let len = map.len();
        for (idx, (key, value)) in map.iter().enumerate() {
            self.pad(indent + 1);
            let encoded = serde_json::to_string(key).unwrap_or_else(|_| "\"\"".to_string());
            self.colored(&encoded, Tone::Key);
            self.colored(":", Tone::Punct);
            self.out.push(' ');
            self.value(value, indent + 1);
            if idx + 1 < len {
                self.colored(",", Tone::Punct);
            }
            self.out.push('\n');
        }
        self.pad(indent);
        self.colored("}", Tone::Punct);
    }

    fn pad(&mut self, level: usize) {
        for _ in 0..level {
            self.out.push_str(INDENT);
        }
    }

    fn colored(&mut self, text: &str, tone: Tone) {
        if !self.use_color {
            self.out.push_str(text);
            return;
        }
        self.out.push_str("\u{1b}[");
        self.out.push_str(tone.code());
        self.out.push('m');
        self.out.push_str(text);
        self.out.push_str("\u{1b}[0m");
    }
}

#[cfg(test)]
mod tests {
    use super::colorize_json;
    use serde_json::json;

    #[test]
    fn colorize_json_matches_pretty_when_disabled() {
        let value = json!({
            "item_values": { "nauvis": { "iron-plate": 2.5 } },
            "trades": { "nauvis": [1, true, null] }
        });
        let plain = colorize_json(&value, false);
        let pretty = serde_json::to_string_pretty(&value).expect("pretty");
        assert_eq!(plain, pretty);
    }

    #[test]
    fn colorize_json_emits_ansi_when_enabled() {
        let value = json!({"k":"v","n":1,"b":true,"z":null});
        let colored = colorize_json(&value, true);
        assert!(colored.contains("\u{1b}["));
        assert!(colored.contains("\u{1b}[36m\"k\"\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[32m\"v\"\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[33m1\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[35mtrue\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[39mnull\u{1b}[0m"));
    }
}
