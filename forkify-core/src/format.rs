//! Display helpers shared by front-ends.

/// Denominators tried when rendering a count as a fraction.
const DENOMINATORS: &[u32] = &[2, 3, 4, 8];
const FRACTION_TOLERANCE: f64 = 0.01;

/// Render an ingredient count for people: 2.5 -> "2 1/2", 0.25 -> "1/4".
/// Missing counts render as "?".
pub fn format_count(count: Option<f64>) -> String {
    let Some(count) = count.filter(|c| c.is_finite() && *c >= 0.0) else {
        return "?".to_string();
    };

    let mut whole = count.trunc();
    let frac = count - whole;

    if frac < FRACTION_TOLERANCE {
        return format!("{}", whole as u64);
    }
    if 1.0 - frac < FRACTION_TOLERANCE {
        whole += 1.0;
        return format!("{}", whole as u64);
    }

    for &den in DENOMINATORS {
        let num = (frac * f64::from(den)).round();
        if (num / f64::from(den) - frac).abs() < FRACTION_TOLERANCE {
            let (num, den) = reduce(num as u32, den);
            return if whole == 0.0 {
                format!("{}/{}", num, den)
            } else {
                format!("{} {}/{}", whole as u64, num, den)
            };
        }
    }

    let rounded = format!("{:.2}", count);
    rounded.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn reduce(num: u32, den: u32) -> (u32, u32) {
    let mut a = num;
    let mut b = den;
    while b != 0 {
        (a, b) = (b, a % b);
    }
    (num / a, den / a)
}

/// Shorten a title to whole words whose combined length fits `limit`,
/// appending " ..." when anything was cut.
pub fn limit_title(title: &str, limit: usize) -> String {
    if title.chars().count() <= limit {
        return title.to_string();
    }

    let mut total = 0;
    let mut kept = Vec::new();
    for word in title.split_whitespace() {
        let len = word.chars().count();
        if total + len <= limit {
            kept.push(word);
        }
        total += len;
    }
    format!("{} ...", kept.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole_numbers() {
        assert_eq!(format_count(Some(2.0)), "2");
        assert_eq!(format_count(Some(0.0)), "0");
        assert_eq!(format_count(Some(2.999)), "3");
    }

    #[test]
    fn test_format_fractions() {
        assert_eq!(format_count(Some(0.5)), "1/2");
        assert_eq!(format_count(Some(2.5)), "2 1/2");
        assert_eq!(format_count(Some(0.75)), "3/4");
        assert_eq!(format_count(Some(1.0 / 3.0)), "1/3");
        assert_eq!(format_count(Some(0.625)), "5/8");
    }

    #[test]
    fn test_format_falls_back_to_decimal() {
        assert_eq!(format_count(Some(1.2)), "1.2");
        assert_eq!(format_count(Some(0.05)), "0.05");
    }

    #[test]
    fn test_format_missing() {
        assert_eq!(format_count(None), "?");
        assert_eq!(format_count(Some(f64::NAN)), "?");
    }

    #[test]
    fn test_limit_title() {
        assert_eq!(limit_title("Pizza", 17), "Pizza");
        assert_eq!(
            limit_title("Pasta with tomato and spinach", 17),
            "Pasta with tomato ..."
        );
    }
}
