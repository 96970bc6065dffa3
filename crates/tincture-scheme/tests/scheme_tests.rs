//! End-to-end tests: load, edit and write schemes through the public API.

use tincture_scheme::prelude::*;
use tincture_scheme::{Error, PaletteError, ParseErrorKind};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn no_header() -> WriterConfig {
    WriterConfig {
        license_header: false,
        ..WriterConfig::default()
    }
}

fn load(text: &str) -> SchemeDocument {
    let mut document = SchemeDocument::new();
    document.load(text.as_bytes()).unwrap();
    document
}

/// Colors as sorted `(name, value)` pairs.
fn color_set(document: &SchemeDocument) -> Vec<(String, Option<Rgba>)> {
    let mut colors: Vec<_> = document
        .colors()
        .iter()
        .map(|(_, c)| (c.name().to_string(), c.value()))
        .collect();
    colors.sort_by(|a, b| a.0.cmp(&b.0));
    colors
}

/// Non-empty styles with the value of every set attribute.
fn style_set(document: &SchemeDocument) -> Vec<(String, Vec<(StyleAttribute, AttributeValue)>)> {
    document
        .styles()
        .filter(|style| !style.is_empty())
        .map(|style| {
            let attrs = StyleAttribute::ALL
                .into_iter()
                .filter_map(|attr| style.get(attr).as_set().cloned().map(|v| (attr, v)))
                .collect();
            (style.name().to_string(), attrs)
        })
        .collect()
}

#[test]
fn load_resolves_named_colors_and_writes_them_back_by_name() {
    init_tracing();
    let document = load(
        r##"<style-scheme id="x"><author>A</author><color name="bg" value="#ffffff"/><style name="text" background="bg"/></style-scheme>"##,
    );

    assert_eq!(document.id(), "x");
    assert_eq!(document.author(), "A");
    assert_eq!(document.colors().len(), 1);
    assert_eq!(document.find_named_color("bg"), Some(Rgba::new(1.0, 1.0, 1.0, 1.0)));

    let text = document.style("text").unwrap();
    assert_eq!(text.background(), StyleValue::Set(Rgba::WHITE));

    let output = document.to_text();
    assert!(output.contains(r#"<style name="text" background="bg"/>"#), "{output}");
    assert!(!output.contains(r##"background="#FFFFFF""##));
}

#[test]
fn round_trip_preserves_semantics() {
    init_tracing();
    let mut original = SchemeDocument::new();
    original.set_id("midnight");
    original.set_name("Midnight & Co");
    original.set_author("Ada <ada@example.org>");
    original.set_description("A \"dark\" scheme");
    original.set_dark(true);
    original.set_alternate("noon");

    let blue = Rgba::from_rgb8(0x26, 0x8B, 0xD2);
    let glass = Rgba::from_rgba8(0x10, 0x20, 0x30, 0x80);
    original.add_color(Color::with_rgba("blue", blue));
    original.add_color(Color::with_rgba("glass", glass));
    original.add_color(Color::with_rgba("also-blue", blue));

    let comment = original.get_or_create_style("def:comment");
    comment.set_foreground(blue);
    comment.set_italic(true);
    comment.set_scale(1.25).unwrap();

    let keyword = original.get_or_create_style("c:keyword");
    keyword.set_use_style("def:keyword");
    keyword.set_weight(FontWeight::new(650).unwrap());
    keyword.set_underline(Underline::DoubleLine);

    let selection = original.get_or_create_style("selection");
    selection.set_background(glass);
    selection.set_line_background(Rgba::from_rgb8(1, 2, 3));
    selection.set_strikethrough(false);
    selection.set_bold(true);
    selection.clear(StyleAttribute::Bold);

    let gone = original.get_or_create_style("c:gone");
    gone.set_bold(true);
    gone.clear(StyleAttribute::Bold);
    original.get_or_create_style("never-set");

    let text = original.to_text();
    let mut reloaded = SchemeDocument::new();
    let report = reloaded.load(text.as_bytes()).unwrap();
    assert!(report.is_clean(), "{:?}", report.warnings);

    assert_eq!(reloaded.id(), original.id());
    assert_eq!(reloaded.name(), original.name());
    assert_eq!(reloaded.author(), original.author());
    assert_eq!(reloaded.description(), original.description());
    assert_eq!(reloaded.is_dark(), original.is_dark());
    assert_eq!(reloaded.alternate(), original.alternate());
    assert_eq!(color_set(&reloaded), color_set(&original));
    assert_eq!(style_set(&reloaded), style_set(&original));

    assert_eq!(reloaded.to_text(), text);
}

#[test]
fn empty_styles_are_never_written() {
    let mut document = SchemeDocument::new();
    document.get_or_create_style("untouched");
    let cleared = document.get_or_create_style("cleared");
    cleared.set_foreground(Rgba::BLACK);
    cleared.clear(StyleAttribute::Foreground);
    document.get_or_create_style("kept").set_bold(true);

    let output = document.to_text_with(&no_header(), None);
    assert!(!output.contains("untouched"));
    assert!(!output.contains("cleared"));
    assert_eq!(output.matches("<style ").count(), 1);
}

#[test]
fn recolor_updates_exactly_the_matching_attributes() {
    let old = Rgba::from_rgb8(0xAA, 0, 0);
    let new = Rgba::from_rgb8(0, 0xAA, 0);
    let mut document = SchemeDocument::new();
    let accent = document.add_color(Color::with_rgba("accent", old));

    document.get_or_create_style("a").set_foreground(old);
    let b = document.get_or_create_style("b");
    b.set_background(old);
    b.set_underline_color(Rgba::WHITE);
    document.get_or_create_style("c").set_line_background(Rgba::BLACK);

    assert!(document.set_color_rgba(accent, Some(new)));

    assert_eq!(document.style("a").unwrap().foreground(), StyleValue::Set(new));
    assert_eq!(document.style("b").unwrap().background(), StyleValue::Set(new));
    assert_eq!(
        document.style("b").unwrap().underline_color(),
        StyleValue::Set(Rgba::WHITE)
    );
    assert_eq!(
        document.style("c").unwrap().line_background(),
        StyleValue::Set(Rgba::BLACK)
    );

    let output = document.to_text_with(&no_header(), None);
    assert!(output.contains(r#"foreground="accent""#), "{output}");
    assert!(output.contains(r#"background="accent""#), "{output}");
}

#[test]
fn clear_semantics() {
    let mut document = SchemeDocument::new();
    let style = document.get_or_create_style("text");

    assert!(!style.clear(StyleAttribute::Scale));
    assert_eq!(style.scale(), StyleValue::Unset);

    style.set_scale(2.0).unwrap();
    assert!(style.clear(StyleAttribute::Scale));
    assert!(!style.is_set(StyleAttribute::Scale));
    assert_eq!(style.effective(StyleAttribute::Scale), AttributeValue::Scale(1.0));
    assert!(style.is_empty());
}

#[test]
fn palette_without_marker_leaves_registry_unchanged() {
    let mut document = SchemeDocument::new();
    document.add_color(Color::with_rgba("existing", Rgba::WHITE));

    let err = document
        .import_palette("Name: Nope\n#\n255 0 0 red\n")
        .unwrap_err();
    assert!(matches!(err, Error::Palette(PaletteError::MissingHeader)));
    assert_eq!(color_set(&document).len(), 1);

    document
        .import_palette("GIMP Palette\nName: Warm\n#\n255 0 0 red\n255 128 0\torange\n")
        .unwrap();
    assert_eq!(
        color_set(&document),
        vec![
            ("existing".to_string(), Some(Rgba::WHITE)),
            ("orange".to_string(), Some(Rgba::from_rgb8(255, 128, 0))),
            ("red".to_string(), Some(Rgba::from_rgb8(255, 0, 0))),
        ]
    );
}

#[test]
fn aliases_follow_their_target_within_a_language() {
    let mut document = SchemeDocument::new();
    document.get_or_create_style("c:a").set_use_style("c:b");
    document.get_or_create_style("c:b").set_bold(true);

    let output = document.to_text_with(&no_header(), None);
    let b = output.find(r#"name="c:b""#).unwrap();
    let a = output.find(r#"name="c:a""#).unwrap();
    assert!(b < a, "{output}");
}

#[test]
fn alias_chains_follow_their_targets() {
    let mut document = SchemeDocument::new();
    document.get_or_create_style("c:b").set_use_style("c:c");
    document.get_or_create_style("c:c").set_use_style("c:d");
    document.get_or_create_style("c:d").set_bold(true);

    let output = document.to_text_with(&no_header(), None);
    let d = output.find(r#"name="c:d""#).unwrap();
    let c = output.find(r#"name="c:c""#).unwrap();
    let b = output.find(r#"name="c:b""#).unwrap();
    assert!(d < c && c < b, "{output}");
}

#[test]
fn untagged_styles_precede_def_styles() {
    let mut document = SchemeDocument::new();
    document.get_or_create_style("bracket-match").set_bold(true);
    document.get_or_create_style("def:comment").set_italic(true);
    document.get_or_create_style("text").set_foreground(Rgba::BLACK);
    document.get_or_create_style("c:keyword").set_bold(true);

    let output = document.to_text_with(&no_header(), None);
    let position = |name: &str| output.find(&format!("name=\"{name}\"")).unwrap();
    assert!(position("bracket-match") < position("text"), "{output}");
    assert!(position("text") < position("def:comment"), "{output}");
    assert!(position("def:comment") < position("c:keyword"), "{output}");

    let def_header = output.find("<!-- def -->").unwrap();
    assert!(position("text") < def_header && def_header < position("def:comment"));
}

#[test]
fn duplicate_color_names_keep_values_on_reload() {
    let mut document = SchemeDocument::new();
    document.add_color(Color::with_rgba("bg", Rgba::WHITE));
    document.add_color(Color::with_rgba("bg", Rgba::BLACK));
    document.get_or_create_style("text").set_background(Rgba::BLACK);
    document.get_or_create_style("selection").set_background(Rgba::WHITE);

    let output = document.to_text_with(&no_header(), None);
    assert!(output.contains(r##"background="#000000""##), "{output}");
    assert_eq!(output.matches(r#"background="bg""#).count(), 1, "{output}");

    let reloaded = load(&output);
    assert_eq!(
        reloaded.style("text").unwrap().background(),
        StyleValue::Set(Rgba::BLACK)
    );
    assert_eq!(
        reloaded.style("selection").unwrap().background(),
        StyleValue::Set(Rgba::WHITE)
    );
    assert_eq!(color_set(&reloaded), color_set(&document));
}

#[test]
fn valueless_colors_are_written_as_transparent() {
    let mut document = SchemeDocument::new();
    document.add_color(Color::new("unset", None));
    document.add_color(Color::with_rgba("ink", Rgba::BLACK));

    let output = document.to_text_with(&no_header(), None);
    assert!(output.contains(r##"value="#00000000""##), "{output}");

    let reloaded = load(&output);
    assert_eq!(
        color_set(&reloaded),
        vec![
            ("ink".to_string(), Some(Rgba::BLACK)),
            ("unset".to_string(), Some(Rgba::TRANSPARENT)),
        ]
    );
}

#[test]
fn unknown_element_keeps_surrounding_content() {
    init_tracing();
    let mut document = SchemeDocument::new();
    let err = document
        .load(
            br##"<style-scheme id="x">
  <color name="before" value="#010203"/>
  <style name="early" bold="true"/>
    <gradient from="before"/>
  <color name="after" value="#040506"/>
  <style name="late" italic="true"/>
  <another/>
</style-scheme>
"##,
        )
        .unwrap_err();

    assert_eq!(err.location(), Some((4, 5)));
    assert!(matches!(
        err,
        Error::Parse {
            kind: ParseErrorKind::UnexpectedElement { .. },
            ..
        }
    ));
    assert_eq!(document.find_named_color("before"), Some(Rgba::from_rgb8(1, 2, 3)));
    assert_eq!(document.find_named_color("after"), Some(Rgba::from_rgb8(4, 5, 6)));
    assert!(document.style("early").is_some());
    assert!(document.style("late").is_some());
    assert!(document.origin().is_none());
}

#[test]
fn writer_layout() {
    let mut document = SchemeDocument::new();
    document.set_id("x");
    document.set_name("X");
    document.add_color(Color::with_rgba("zz", Rgba::BLACK));
    document.add_color(Color::with_rgba("aa", Rgba::WHITE));
    document.get_or_create_style("text").set_foreground(Rgba::BLACK);
    document
        .get_or_create_style("rust:attribute")
        .set_foreground(Rgba::from_rgb8(1, 2, 3));

    let registry = StaticLanguageRegistry::new().with_language("rust", "Rust", ["rust:attribute"]);
    let output = document.to_text_with(&no_header(), Some(&registry));
    let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<style-scheme id=\"x\" _name=\"X\" version=\"1.0\">
  <author></author>
  <_description></_description>

  <metadata>
    <property name=\"variant\">light</property>
  </metadata>

  <!-- Named Colors -->
  <color name=\"aa\"             value=\"#FFFFFF\"/>
  <color name=\"zz\"             value=\"#000000\"/>

  <!-- Global Styles -->
  <style name=\"text\"           foreground=\"zz\"/>

  <!-- Rust -->
  <style name=\"rust:attribute\" foreground=\"#010203\"/>

</style-scheme>
";
    assert_eq!(output, expected);
}

#[test]
fn license_header_uses_config() {
    let mut document = SchemeDocument::new();
    let config = WriterConfig {
        license_header: true,
        copyright_year: Some(2020),
        fallback_author: Some("Nobody".into()),
    };
    let output = document.to_text_with(&config, None);
    assert!(output.contains("  Copyright 2020 Nobody\n"), "{output}");

    document.set_author("Grace");
    let output = document.to_text_with(&config, None);
    assert!(output.contains("  Copyright 2020 Grace\n"));

    let mut reloaded = SchemeDocument::new();
    reloaded.load(output.as_bytes()).unwrap();
    assert_eq!(reloaded.author(), "Grace");
}
