/// Stylesheet URL used by most tests.
pub const CSS_URL: &str = "https://fonts.example.test/css?family=Roboto:400,700i|Lato";

/// A font-service style stylesheet with two `@font-face` rules pointing at
/// absolute font URLs.
pub fn two_font_css() -> String {
    r#"
/* latin */
@font-face {
  font-family: 'Roboto';
  font-style: normal;
  font-weight: 400;
  src: url(https://cdn.example.test/s/roboto/Roboto-Regular.woff2) format('woff2');
}
/* latin */
@font-face {
  font-family: 'Roboto';
  font-style: italic;
  font-weight: 700;
  src: url(https://cdn.example.test/s/roboto/Roboto-BoldItalic.ttf) format('truetype');
}
"#
    .to_string()
}

/// A plain stylesheet with relative font references and no `@font-face`
/// family names.
pub fn relative_font_css() -> String {
    r#"
.icon { src: url("../webfonts/icons.woff?v=4.7") }
.icon-old { src: url(../webfonts/icons.eot#iefix) }
"#
    .to_string()
}

/// Fake font bytes that are easy to tell apart in assertions.
pub fn font_bytes(name: &str) -> Vec<u8> {
    format!("FONTDATA:{}", name).into_bytes()
}
