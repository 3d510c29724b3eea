use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SelectorAttrCondition {
    Exists { key: String },
    Eq { key: String, value: String },
    StartsWith { key: String, value: String },
    EndsWith { key: String, value: String },
    Contains { key: String, value: String },
    Includes { key: String, value: String },
    DashMatch { key: String, value: String },
}

impl SelectorAttrCondition {
    fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Exists { key } => element.attrs.contains_key(key),
            Self::Eq { key, value } => element.attrs.get(key) == Some(value),
            Self::StartsWith { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|attr| !value.is_empty() && attr.starts_with(value.as_str())),
            Self::EndsWith { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|attr| !value.is_empty() && attr.ends_with(value.as_str())),
            Self::Contains { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|attr| !value.is_empty() && attr.contains(value.as_str())),
            Self::Includes { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|attr| attr.split_whitespace().any(|token| token == value)),
            Self::DashMatch { key, value } => element.attrs.get(key).is_some_and(|attr| {
                attr == value
                    || attr
                        .strip_prefix(value.as_str())
                        .is_some_and(|rest| rest.starts_with('-'))
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SelectorPseudoClass {
    FirstChild,
    LastChild,
    Disabled,
    Enabled,
    NthChild(NthChildSelector),
    Not(Vec<Vec<SelectorPart>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NthChildSelector {
    Exact(usize),
    Odd,
    Even,
    AnPlusB(i64, i64),
}

impl NthChildSelector {
    fn matches(&self, index: usize) -> bool {
        match self {
            Self::Exact(n) => index == *n,
            Self::Odd => index % 2 == 1,
            Self::Even => index % 2 == 0,
            Self::AnPlusB(a, b) => {
                let pos = index as i64;
                if *a == 0 {
                    return pos == *b;
                }
                let diff = pos - b;
                diff % a == 0 && diff / a >= 0
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SelectorStep {
    pub(crate) tag: Option<String>,
    pub(crate) universal: bool,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<SelectorAttrCondition>,
    pub(crate) pseudo_classes: Vec<SelectorPseudoClass>,
}

impl SelectorStep {
    pub(crate) fn id_only(&self) -> Option<&str> {
        if !self.universal
            && self.tag.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
            && self.pseudo_classes.is_empty()
        {
            self.id.as_deref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SelectorCombinator {
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorPart {
    pub(crate) step: SelectorStep,
    // Relation to previous (left) selector part.
    pub(crate) combinator: Option<SelectorCombinator>,
}

pub(crate) fn parse_selector_groups(selector: &str) -> Result<Vec<Vec<SelectorPart>>> {
    split_selector_groups(selector)?
        .iter()
        .map(|group| parse_selector_chain(group))
        .collect()
}

pub(crate) fn parse_selector_chain(selector: &str) -> Result<Vec<SelectorPart>> {
    let selector = selector.trim();
    if selector.is_empty() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }

    let tokens = tokenize_selector(selector)?;
    let mut steps = Vec::new();
    let mut pending_combinator: Option<SelectorCombinator> = None;

    for token in tokens {
        let combinator = match token.as_str() {
            ">" => Some(SelectorCombinator::Child),
            "+" => Some(SelectorCombinator::AdjacentSibling),
            "~" => Some(SelectorCombinator::GeneralSibling),
            _ => None,
        };
        if let Some(combinator) = combinator {
            if pending_combinator.is_some() || steps.is_empty() {
                return Err(Error::UnsupportedSelector(selector.into()));
            }
            pending_combinator = Some(combinator);
            continue;
        }

        let step = parse_selector_step(&token)?;
        let combinator = if steps.is_empty() {
            None
        } else {
            Some(
                pending_combinator
                    .take()
                    .unwrap_or(SelectorCombinator::Descendant),
            )
        };
        steps.push(SelectorPart { step, combinator });
    }

    if steps.is_empty() || pending_combinator.is_some() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }

    Ok(steps)
}

/// Walks `selector` outside of brackets, parens and quotes, calling `on_char`
/// with each top-level character.
fn scan_top_level(selector: &str, mut on_char: impl FnMut(char, bool)) -> Result<()> {
    let mut bracket_depth = 0usize;
    let mut paren_depth = 0usize;
    let mut quote: Option<char> = None;

    for ch in selector.chars() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            on_char(ch, false);
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '[' => bracket_depth += 1,
            ']' => {
                bracket_depth = bracket_depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::UnsupportedSelector(selector.into()))?;
            }
            '(' => paren_depth += 1,
            ')' => {
                paren_depth = paren_depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::UnsupportedSelector(selector.into()))?;
            }
            _ => {}
        }
        let top_level = bracket_depth == 0 && paren_depth == 0 && !matches!(ch, ']' | ')');
        on_char(ch, top_level);
    }

    if bracket_depth != 0 || paren_depth != 0 || quote.is_some() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }
    Ok(())
}

pub(crate) fn split_selector_groups(selector: &str) -> Result<Vec<String>> {
    let mut groups = Vec::new();
    let mut current = String::new();
    let mut empty_group = false;

    scan_top_level(selector, |ch, top_level| {
        if ch == ',' && top_level {
            if current.trim().is_empty() {
                empty_group = true;
            }
            groups.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    })?;

    if empty_group || current.trim().is_empty() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }
    groups.push(current.trim().to_string());
    Ok(groups)
}

fn tokenize_selector(selector: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    scan_top_level(selector, |ch, top_level| {
        if top_level && matches!(ch, '>' | '+' | '~') {
            if !current.trim().is_empty() {
                tokens.push(current.trim().to_string());
            }
            current.clear();
            tokens.push(ch.to_string());
        } else if top_level && ch.is_ascii_whitespace() {
            if !current.trim().is_empty() {
                tokens.push(current.trim().to_string());
            }
            current.clear();
        } else {
            current.push(ch);
        }
    })?;

    if !current.trim().is_empty() {
        tokens.push(current.trim().to_string());
    }
    Ok(tokens)
}

fn parse_selector_step(part: &str) -> Result<SelectorStep> {
    let bytes = part.as_bytes();
    let mut i = 0usize;
    let mut step = SelectorStep::default();

    while i < bytes.len() {
        match bytes[i] {
            b'*' => {
                if step.universal || step.tag.is_some() {
                    return Err(Error::UnsupportedSelector(part.into()));
                }
                step.universal = true;
                i += 1;
            }
            b'#' => {
                let Some((id, next)) = parse_selector_ident(part, i + 1) else {
                    return Err(Error::UnsupportedSelector(part.into()));
                };
                if step.id.replace(id).is_some() {
                    return Err(Error::UnsupportedSelector(part.into()));
                }
                i = next;
            }
            b'.' => {
                let Some((class_name, next)) = parse_selector_ident(part, i + 1) else {
                    return Err(Error::UnsupportedSelector(part.into()));
                };
                step.classes.push(class_name);
                i = next;
            }
            b'[' => {
                let (attr, next) = parse_selector_attr_condition(part, i)?;
                step.attrs.push(attr);
                i = next;
            }
            b':' => {
                let (pseudo, next) = parse_selector_pseudo(part, i)?;
                step.pseudo_classes.push(pseudo);
                i = next;
            }
            _ => {
                if i != 0 {
                    return Err(Error::UnsupportedSelector(part.into()));
                }
                let Some((tag, next)) = parse_selector_ident(part, i) else {
                    return Err(Error::UnsupportedSelector(part.into()));
                };
                step.tag = Some(tag.to_ascii_lowercase());
                i = next;
            }
        }
    }

    Ok(step)
}

fn parse_selector_pseudo(part: &str, start: usize) -> Result<(SelectorPseudoClass, usize)> {
    let unsupported = || Error::UnsupportedSelector(part.into());
    let name_start = start + 1;
    let (name, mut next) = parse_selector_ident(part, name_start).ok_or_else(unsupported)?;
    let name = name.to_ascii_lowercase();

    let argument = if part.as_bytes().get(next) == Some(&b'(') {
        let body = part.get(next + 1..).ok_or_else(unsupported)?;
        let close = find_matching_paren(body).ok_or_else(unsupported)?;
        let raw = body[..close].trim().to_string();
        next += close + 2;
        Some(raw)
    } else {
        None
    };

    let pseudo = match (name.as_str(), argument) {
        ("first-child", None) => SelectorPseudoClass::FirstChild,
        ("last-child", None) => SelectorPseudoClass::LastChild,
        ("disabled", None) => SelectorPseudoClass::Disabled,
        ("enabled", None) => SelectorPseudoClass::Enabled,
        ("nth-child", Some(raw)) => {
            SelectorPseudoClass::NthChild(parse_nth_child_selector(&raw).ok_or_else(unsupported)?)
        }
        ("not", Some(raw)) if !raw.is_empty() => {
            SelectorPseudoClass::Not(parse_selector_groups(&raw)?)
        }
        _ => return Err(unsupported()),
    };
    Ok((pseudo, next))
}

fn find_matching_paren(body: &str) -> Option<usize> {
    let mut depth = 1usize;
    let mut quote: Option<u8> = None;
    for (idx, b) in body.bytes().enumerate() {
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            continue;
        }
        match b {
            b'\'' | b'"' => quote = Some(b),
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_nth_child_selector(raw: &str) -> Option<NthChildSelector> {
    let compact = raw
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    match compact.as_str() {
        "" => None,
        "odd" => Some(NthChildSelector::Odd),
        "even" => Some(NthChildSelector::Even),
        other if other.contains('n') => parse_nth_child_expression(other),
        other => match other.parse::<usize>().ok()? {
            0 => None,
            value => Some(NthChildSelector::Exact(value)),
        },
    }
}

fn parse_nth_child_expression(expr: &str) -> Option<NthChildSelector> {
    let (a_part, b_part) = expr.split_once('n')?;
    let a = match a_part {
        "" | "+" => 1,
        "-" => -1,
        _ => a_part.parse::<i64>().ok()?,
    };
    let b = if b_part.is_empty() {
        0
    } else if let Some(rest) = b_part.strip_prefix('+') {
        rest.parse::<i64>().ok()?
    } else if let Some(rest) = b_part.strip_prefix('-') {
        -rest.parse::<i64>().ok()?
    } else {
        return None;
    };
    Some(NthChildSelector::AnPlusB(a, b))
}

fn parse_selector_ident(src: &str, start: usize) -> Option<(String, usize)> {
    let bytes = src.as_bytes();
    if start >= bytes.len() || !is_selector_ident_char(bytes[start]) {
        return None;
    }
    let mut end = start + 1;
    while end < bytes.len() && is_selector_ident_char(bytes[end]) {
        end += 1;
    }
    Some((src.get(start..end)?.to_string(), end))
}

fn is_selector_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b >= 0x80
}

fn parse_selector_attr_condition(
    src: &str,
    open_bracket: usize,
) -> Result<(SelectorAttrCondition, usize)> {
    let unsupported = || Error::UnsupportedSelector(src.into());
    let bytes = src.as_bytes();
    let mut i = open_bracket + 1;
    skip_selector_ws(bytes, &mut i);

    let key_start = i;
    while i < bytes.len() && is_selector_attr_name_char(bytes[i]) {
        i += 1;
    }
    if key_start == i {
        return Err(unsupported());
    }
    let key = src.get(key_start..i).ok_or_else(unsupported)?.to_ascii_lowercase();
    skip_selector_ws(bytes, &mut i);

    if bytes.get(i) == Some(&b']') {
        return Ok((SelectorAttrCondition::Exists { key }, i + 1));
    }

    let (op, after_op) = match (bytes.get(i), bytes.get(i + 1)) {
        (Some(b'='), _) => (b'=', i + 1),
        (Some(op @ (b'^' | b'$' | b'*' | b'~' | b'|')), Some(b'=')) => (*op, i + 2),
        _ => return Err(unsupported()),
    };
    i = after_op;
    skip_selector_ws(bytes, &mut i);

    let value = match bytes.get(i) {
        Some(quote @ (b'"' | b'\'')) => {
            let close = src
                .get(i + 1..)
                .and_then(|rest| rest.find(*quote as char))
                .ok_or_else(unsupported)?;
            let value = src[i + 1..i + 1 + close].to_string();
            i += close + 2;
            value
        }
        Some(_) => {
            let start = i;
            while i < bytes.len() && bytes[i] != b']' && !bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            src[start..i].to_string()
        }
        None => return Err(unsupported()),
    };

    skip_selector_ws(bytes, &mut i);
    if bytes.get(i) != Some(&b']') {
        return Err(unsupported());
    }

    let cond = match op {
        b'^' => SelectorAttrCondition::StartsWith { key, value },
        b'$' => SelectorAttrCondition::EndsWith { key, value },
        b'*' => SelectorAttrCondition::Contains { key, value },
        b'~' => SelectorAttrCondition::Includes { key, value },
        b'|' => SelectorAttrCondition::DashMatch { key, value },
        _ => SelectorAttrCondition::Eq { key, value },
    };
    Ok((cond, i + 1))
}

fn skip_selector_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
        *i += 1;
    }
}

fn is_selector_attr_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b':'
}

impl Dom {
    pub(crate) fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    pub(crate) fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let groups = parse_selector_groups(selector)?;

        if groups.len() == 1 && groups[0].len() == 1 {
            if let Some(id) = groups[0][0].step.id_only() {
                return Ok(self.by_id(id).into_iter().collect());
            }
        }

        let mut candidates = Vec::new();
        self.collect_elements_dfs(self.root, &mut candidates);
        Ok(self.filter_matching(candidates, &groups))
    }

    pub(crate) fn query_selector_from(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.query_selector_all_from(root, selector)?.into_iter().next())
    }

    pub(crate) fn query_selector_all_from(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        let groups = parse_selector_groups(selector)?;
        let mut candidates = Vec::new();
        self.collect_elements_descendants_dfs(root, &mut candidates);
        Ok(self.filter_matching(candidates, &groups))
    }

    fn filter_matching(&self, candidates: Vec<NodeId>, groups: &[Vec<SelectorPart>]) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|candidate| {
                groups
                    .iter()
                    .any(|steps| self.matches_selector_chain(*candidate, steps))
                    && seen.insert(*candidate)
            })
            .collect()
    }

    pub(crate) fn closest(&self, node_id: NodeId, selector: &str) -> Result<Option<NodeId>> {
        let groups = parse_selector_groups(selector)?;
        let mut cursor = Some(node_id);
        while let Some(current) = cursor {
            if groups
                .iter()
                .any(|steps| self.matches_selector_chain(current, steps))
            {
                return Ok(Some(current));
            }
            cursor = self.parent(current);
        }
        Ok(None)
    }

    fn matches_selector_chain(&self, node_id: NodeId, steps: &[SelectorPart]) -> bool {
        let Some((last, _)) = steps.split_last() else {
            return false;
        };
        if !self.matches_step(node_id, &last.step) {
            return false;
        }

        let mut current = node_id;
        for idx in (1..steps.len()).rev() {
            let prev_step = &steps[idx - 1].step;
            let combinator = steps[idx]
                .combinator
                .unwrap_or(SelectorCombinator::Descendant);

            let matched = match combinator {
                SelectorCombinator::Child => self
                    .parent(current)
                    .filter(|parent| self.matches_step(*parent, prev_step)),
                SelectorCombinator::Descendant => {
                    let mut cursor = self.parent(current);
                    let mut found = None;
                    while let Some(parent) = cursor {
                        if self.matches_step(parent, prev_step) {
                            found = Some(parent);
                            break;
                        }
                        cursor = self.parent(parent);
                    }
                    found
                }
                SelectorCombinator::AdjacentSibling => self
                    .previous_element_sibling(current)
                    .filter(|sibling| self.matches_step(*sibling, prev_step)),
                SelectorCombinator::GeneralSibling => {
                    let mut cursor = self.previous_element_sibling(current);
                    let mut found = None;
                    while let Some(sibling) = cursor {
                        if self.matches_step(sibling, prev_step) {
                            found = Some(sibling);
                            break;
                        }
                        cursor = self.previous_element_sibling(sibling);
                    }
                    found
                }
            };

            let Some(matched) = matched else {
                return false;
            };
            current = matched;
        }

        true
    }

    fn matches_step(&self, node_id: NodeId, step: &SelectorStep) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };

        if let Some(tag) = &step.tag {
            if !element.is_tag(tag) {
                return false;
            }
        }

        if let Some(id) = &step.id {
            if element.attrs.get("id") != Some(id) {
                return false;
            }
        }

        if step
            .classes
            .iter()
            .any(|class_name| !has_class(element, class_name))
        {
            return false;
        }

        if !step.attrs.iter().all(|cond| cond.matches(element)) {
            return false;
        }

        step.pseudo_classes.iter().all(|pseudo| match pseudo {
            SelectorPseudoClass::FirstChild => self.previous_element_sibling(node_id).is_none(),
            SelectorPseudoClass::LastChild => self.next_element_sibling(node_id).is_none(),
            SelectorPseudoClass::Disabled => element.disabled,
            SelectorPseudoClass::Enabled => !element.disabled,
            SelectorPseudoClass::NthChild(nth) => self
                .element_index(node_id)
                .is_some_and(|index| nth.matches(index)),
            SelectorPseudoClass::Not(inners) => !inners
                .iter()
                .any(|inner| self.matches_selector_chain(node_id, inner)),
        })
    }
}
