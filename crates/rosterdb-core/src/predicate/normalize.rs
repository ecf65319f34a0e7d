use crate::predicate::Predicate;

/// Normalize a predicate into a flat canonical form.
///
/// Rules:
/// - nested `And`/`Or` of the same connective are spliced flat
/// - identity elements are dropped (`True` in `And`, `False` in `Or`)
/// - absorbing elements short-circuit (`False` in `And`, `True` in `Or`)
/// - empty/singleton connectives collapse
/// - double negation folds
///
/// Normalization never changes evaluation: for every row, the input and
/// output predicates agree.
#[must_use]
pub fn normalize(predicate: &Predicate) -> Predicate {
    match predicate {
        Predicate::And(children) => normalize_and(children),
        Predicate::Or(children) => normalize_or(children),
        Predicate::Not(child) => normalize_not(child),
        Predicate::True
        | Predicate::False
        | Predicate::Compare(_)
        | Predicate::IsNull { .. }
        | Predicate::IsNotNull { .. } => predicate.clone(),
    }
}

fn normalize_and(children: &[Predicate]) -> Predicate {
    let mut flat = Vec::with_capacity(children.len());

    for child in children {
        match normalize(child) {
            Predicate::True => {}
            Predicate::False => return Predicate::False,
            Predicate::And(nested) => flat.extend(nested),
            other => flat.push(other),
        }
    }

    match flat.len() {
        0 => Predicate::True,
        1 => flat.into_iter().next().unwrap_or(Predicate::True),
        _ => Predicate::And(flat),
    }
}

fn normalize_or(children: &[Predicate]) -> Predicate {
    let mut flat = Vec::with_capacity(children.len());

    for child in children {
        match normalize(child) {
            Predicate::False => {}
            Predicate::True => return Predicate::True,
            Predicate::Or(nested) => flat.extend(nested),
            other => flat.push(other),
        }
    }

    match flat.len() {
        0 => Predicate::False,
        1 => flat.into_iter().next().unwrap_or(Predicate::False),
        _ => Predicate::Or(flat),
    }
}

fn normalize_not(child: &Predicate) -> Predicate {
    match normalize(child) {
        Predicate::True => Predicate::False,
        Predicate::False => Predicate::True,
        Predicate::Not(inner) => *inner,
        other => Predicate::Not(Box::new(other)),
    }
}

///
/// TESTS
///
