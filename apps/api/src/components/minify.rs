// Cosmetic whitespace cleanup. Each replacement is a single left-to-right pass,
// so runs of four spaces become two, not one.

pub fn optimize_html(html: &str) -> String {
    html.replace("  ", " ").replace("\n\n", "\n").trim().to_string()
}

pub fn optimize_css(css: &str) -> String {
    css.replace("  ", " ")
        .replace(";}", "}")
        .replace("\n\n", "\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimize_html() {
        assert_eq!(optimize_html("  <div>  a</div>\n\n<p/>\n"), "<div> a</div>\n<p/>");
        assert_eq!(optimize_html("a    b"), "a  b");
    }

    #[test]
    fn test_optimize_css_drops_trailing_semicolon() {
        assert_eq!(
            optimize_css("button{color:red;}\n\n.a{margin:0;  }"),
            "button{color:red}\n.a{margin:0; }"
        );
    }
}
