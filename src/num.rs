use crate::domain::entities::table::Cell;

pub fn parse_number(cell: &Cell) -> f64 {
    match cell {
        Cell::Number(value) => {
            if value.is_nan() {
                0.0
            } else {
                *value
            }
        }
        Cell::Text(value) => {
            let cleaned: String = value
                .chars()
                .filter(|c| !c.is_whitespace() && *c != ',')
                .collect();
            let parsed = cleaned.parse::<f64>().unwrap_or(0.0);
            if parsed.is_nan() {
                0.0
            } else {
                parsed
            }
        }
    }
}

pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator.abs() < f64::EPSILON {
        0.0
    } else {
        numerator / denominator
    }
}

pub fn percentage(part: f64, whole: f64) -> f64 {
    safe_div(part, whole) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_strips_thousands_separators() {
        assert_eq!(parse_number(&Cell::Text("1,234.50".to_string())), 1234.5);
        assert_eq!(parse_number(&Cell::Text(" 2 500 ".to_string())), 2500.0);
    }

    #[test]
    fn parse_number_treats_garbage_as_zero() {
        assert_eq!(parse_number(&Cell::Text("N/A".to_string())), 0.0);
        assert_eq!(parse_number(&Cell::Text(String::new())), 0.0);
        assert_eq!(parse_number(&Cell::Text("NaN".to_string())), 0.0);
    }

    #[test]
    fn safe_div_guards_zero_denominator() {
        assert_eq!(safe_div(10.0, 0.0), 0.0);
        assert_eq!(safe_div(10.0, 4.0), 2.5);
    }
}
