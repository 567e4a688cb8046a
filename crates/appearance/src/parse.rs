// Reading DA strings back, e.g. after a save/reload round trip.
use crate::error::AppearanceError;
use crate::name::unescape_name;

/// Color operator found in a DA string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorOperands {
    Gray(f32),
    Rgb(f32, f32, f32),
    Cmyk(f32, f32, f32, f32),
}

/// The pieces of a parsed DA string.
#[derive(Debug, Clone, PartialEq)]
pub struct AppearanceComponents {
    /// Raw font name bytes with `#XX` escapes resolved.
    pub font_name: Vec<u8>,
    pub font_size: f32,
    pub color: Option<ColorOperands>,
}

impl AppearanceComponents {
    /// Parses the text of a DA entry.
    ///
    /// Only the `Tf`, `g`, `rg` and `k` operators are interpreted; the last
    /// occurrence of each wins. A missing `Tf` is an error.
    pub fn parse(da: &str) -> Result<Self, AppearanceError> {
        let mut operands: Vec<&str> = Vec::new();
        let mut font: Option<(Vec<u8>, f32)> = None;
        let mut color = None;

        for token in da.split_ascii_whitespace() {
            match token {
                "Tf" => {
                    let [name, size] = take::<2>(&mut operands, "Tf")?;
                    let Some(name) = name.strip_prefix('/') else {
                        let found = format!("expected a name before Tf, got '{name}'");
                        return Err(AppearanceError::Malformed(found));
                    };
                    font = Some((unescape_name(name), number(size)?));
                }
                "g" => {
                    let [gray] = take::<1>(&mut operands, "g")?;
                    color = Some(ColorOperands::Gray(number(gray)?));
                }
                "rg" => {
                    let [r, g, b] = take::<3>(&mut operands, "rg")?;
                    color = Some(ColorOperands::Rgb(number(r)?, number(g)?, number(b)?));
                }
                "k" => {
                    let [c, m, y, k] = take::<4>(&mut operands, "k")?;
                    color = Some(ColorOperands::Cmyk(
                        number(c)?,
                        number(m)?,
                        number(y)?,
                        number(k)?,
                    ));
                }
                operand => operands.push(operand),
            }
        }

        let Some((font_name, font_size)) = font else {
            return Err(AppearanceError::Malformed("no Tf operator".to_string()));
        };
        Ok(Self {
            font_name,
            font_size,
            color,
        })
    }
}

fn take<'a, const N: usize>(
    stack: &mut Vec<&'a str>,
    op: &str,
) -> Result<[&'a str; N], AppearanceError> {
    if stack.len() < N {
        return Err(AppearanceError::Malformed(format!(
            "'{op}' needs {N} operands, found {}",
            stack.len()
        )));
    }
    let tail = stack.split_off(stack.len() - N);
    stack.clear();
    tail.try_into()
        .map_err(|_| AppearanceError::Malformed(format!("'{op}' operand count")))
}

fn number(token: &str) -> Result<f32, AppearanceError> {
    token
        .parse::<f32>()
        .map_err(|_| AppearanceError::Malformed(format!("'{token}' is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_synthesized_string() {
        let parts = AppearanceComponents::parse("/Helvetica 12.0 Tf 1.000 0.000 0.502 rg")
            .unwrap();
        assert_eq!(parts.font_name, b"Helvetica");
        assert_eq!(parts.font_size, 12.0);
        assert_eq!(parts.color, Some(ColorOperands::Rgb(1.0, 0.0, 0.502)));
    }

    #[test]
    fn parses_gray_and_escaped_names() {
        let parts = AppearanceComponents::parse("0 g /Times#20Roman 9 Tf")
            .unwrap();
        assert_eq!(parts.font_name, b"Times Roman");
        assert_eq!(parts.color, Some(ColorOperands::Gray(0.0)));
    }

    #[test]
    fn missing_tf_is_malformed() {
        assert!(matches!(
            AppearanceComponents::parse("0 0 0 rg"),
            Err(AppearanceError::Malformed(_))
        ));
    }

    #[test]
    fn short_operand_list_is_malformed() {
        assert!(AppearanceComponents::parse("/Helv Tf").is_err());
        assert!(AppearanceComponents::parse("/Helv 12 Tf 1 0 rg").is_err());
    }
}
