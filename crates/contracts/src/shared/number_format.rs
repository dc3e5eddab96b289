//! Форматирование чисел для таблиц отчётов и CSV

/// Форматирует число с разделителем тысяч (пробел) и указанным количеством знаков после точки
///
/// # Примеры
///
/// ```
/// use contracts::shared::number_format::format_number_with_decimals;
/// assert_eq!(format_number_with_decimals(1234.567, 2), "1 234.57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer_part, decimal_part) = match unsigned.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (unsigned, None),
    };

    let digits: Vec<char> = integer_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(*ch);
    }

    // "-0.00" выглядит странно в итогах
    let sign = if grouped.chars().all(|c| c == '0' || c == ' ')
        && decimal_part.map_or(true, |d| d.chars().all(|c| c == '0'))
    {
        ""
    } else {
        sign
    };

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Денежное значение: 2 знака после точки и разделитель тысяч
pub fn format_money(value: f64) -> String {
    format_number_with_decimals(value, 2)
}

/// Процент с одним знаком; `None` (например, план равен нулю) выводится как "—"
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}%", format_number_with_decimals(v, 1)),
        None => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "1 234.56");
        assert_eq!(format_money(1234567.89), "1 234 567.89");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(-1234.56), "-1 234.56");
        assert_eq!(format_money(-0.001), "0.00");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1 235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1 234.6");
        assert_eq!(format_number_with_decimals(1234.567, 3), "1 234.567");
        assert_eq!(format_number_with_decimals(999.0, 0), "999");
        assert_eq!(format_number_with_decimals(-123456.0, 0), "-123 456");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(105.26)), "105.3%");
        assert_eq!(format_percent(None), "—");
    }
}
