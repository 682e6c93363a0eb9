/// Format an income figure as whole dollars: $ 1,234
///
/// Halves round away from zero. The sign follows the prefix: $ -1,234
pub fn income(val: f64) -> String {
    if !val.is_finite() {
        return format!("$ {val}");
    }
    let rounded = val.round();
    let negative = rounded < 0.0;
    let int_part = format!("{:.0}", rounded.abs());

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("$ -{with_commas}")
    } else {
        format!("$ {with_commas}")
    }
}

/// Format an active-partner count. Whole numbers print without a decimal point.
pub fn partners(val: f64) -> String {
    format!("{val}")
}
