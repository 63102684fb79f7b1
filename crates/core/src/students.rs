//! Student report rules: age statistics and name-initial listing.

/// Initial used by the name listing when the caller does not pick one.
pub const DEFAULT_NAME_INITIAL: char = 'A';

/// Mean of a sequence of ages, folded in a single pass.
///
/// Returns `0.0` for an empty sequence so the result matches the
/// `COALESCE(AVG(age), 0)` aggregate used by the repository.
pub fn average_age<I>(ages: I) -> f64
where
    I: IntoIterator<Item = i32>,
{
    let (sum, count) = ages
        .into_iter()
        .fold((0_i64, 0_u64), |(sum, count), age| (sum + i64::from(age), count + 1));

    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Names whose first letter, uppercased, equals `initial` uppercased.
///
/// The matching names are returned uppercased and sorted ascending.
pub fn names_starting_with<'a, I>(names: I, initial: char) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let wanted: String = initial.to_uppercase().collect();

    let mut matched: Vec<String> = names
        .into_iter()
        .filter(|name| {
            name.chars()
                .next()
                .is_some_and(|first| first.to_uppercase().eq(wanted.chars()))
        })
        .map(str::to_uppercase)
        .collect();

    matched.sort();
    matched
}

/// Parse an optional `?letter=` value into a single initial.
///
/// Empty or absent values fall back to [`DEFAULT_NAME_INITIAL`]; only the
/// first character of longer values is used.
pub fn parse_initial(letter: Option<&str>) -> char {
    letter
        .and_then(|l| l.trim().chars().next())
        .unwrap_or(DEFAULT_NAME_INITIAL)
}
