//! Built-in pad templates.
//!
//! A template is a complete set of starting contents for the three pad
//! files. `starter` is the default for new pads and the target of the
//! shell's Reset button.

/// Complete starting contents for a pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadTemplate {
    pub name: &'static str,
    pub summary: &'static str,
    pub markup: &'static str,
    pub style: &'static str,
    pub script: &'static str,
}

/// The classic hello-world pad.
pub const STARTER: PadTemplate = PadTemplate {
    name: "starter",
    summary: "hello-world page with a splash of CSS and JS",
    markup: r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>Live Preview</title>
</head>
<body>
  <h1>Hello, World!</h1>
  <script>console.log('HTML loaded');</script>
</body>
</html>
"#,
    style: r#"body {
  font-family: sans-serif;
  background-color: #f0f0f0;
  padding: 2rem;
}
"#,
    script: "console.log('Hello from JS');\n",
};

/// Bare skeleton, nothing in it.
pub const BLANK: PadTemplate = PadTemplate {
    name: "blank",
    summary: "empty page skeleton",
    markup: r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>Untitled</title>
</head>
<body>
</body>
</html>
"#,
    style: "",
    script: "",
};

/// Canvas animation demo. Good for checking that a preview reload
/// actually kills the previous animation frame loop.
pub const CANVAS: PadTemplate = PadTemplate {
    name: "canvas",
    summary: "bouncing ball on a 2D canvas",
    markup: r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>Canvas Pad</title>
</head>
<body>
  <canvas id="stage" width="480" height="320"></canvas>
</body>
</html>
"#,
    style: r#"body {
  display: flex;
  justify-content: center;
  padding: 2rem;
  background: #111;
}

canvas {
  background: #1d2330;
  border-radius: 8px;
}
"#,
    script: r#"const ctx = document.getElementById('stage').getContext('2d');
let x = 60, y = 60, dx = 2.4, dy = 1.8;

function tick() {
  ctx.clearRect(0, 0, 480, 320);
  ctx.beginPath();
  ctx.arc(x, y, 14, 0, Math.PI * 2);
  ctx.fillStyle = '#4cc38a';
  ctx.fill();
  if (x < 14 || x > 466) dx = -dx;
  if (y < 14 || y > 306) dy = -dy;
  x += dx;
  y += dy;
  requestAnimationFrame(tick);
}

tick();
"#,
};

/// All built-in templates, in display order.
pub const TEMPLATES: &[PadTemplate] = &[STARTER, BLANK, CANVAS];

impl PadTemplate {
    /// Look up a built-in template by name.
    pub fn named(name: &str) -> Option<&'static PadTemplate> {
        TEMPLATES.iter().find(|t| t.name == name)
    }

    /// The template new pads start from, and the one Reset restores.
    pub const fn default_template() -> &'static PadTemplate {
        &STARTER
    }

    /// Comma-separated template names, for error messages.
    pub fn names() -> String {
        TEMPLATES
            .iter()
            .map(|t| t.name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_lookup() {
        assert_eq!(PadTemplate::named("starter"), Some(&STARTER));
        assert_eq!(PadTemplate::named("canvas"), Some(&CANVAS));
        assert_eq!(PadTemplate::named("nope"), None);
    }

    #[test]
    fn test_default_is_starter() {
        assert_eq!(PadTemplate::default_template().name, "starter");
    }

    #[test]
    fn test_names_listing() {
        let names = PadTemplate::names();
        assert!(names.contains("starter"));
        assert!(names.contains("blank"));
        assert!(names.contains("canvas"));
    }
}
