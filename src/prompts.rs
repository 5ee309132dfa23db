pub const STYLE_TRANSFER: &str = include_str!("../data/prompts/style_transfer.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_multiple_vars() {
        assert_eq!(
            render("{{a}} and {{b}}", &[("a", "cats"), ("b", "dogs")]),
            "cats and dogs"
        );
    }

    #[test]
    fn test_style_transfer_has_style_placeholder() {
        assert!(STYLE_TRANSFER.contains("{{style}}"));
    }

    #[test]
    fn test_style_transfer_renders_label() {
        let prompt = render(STYLE_TRANSFER, &[("style", "Watercolor")]);
        assert!(prompt.contains("Watercolor"));
        assert!(!prompt.contains("{{"));
    }
}
