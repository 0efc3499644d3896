//! Post-processing passes over a raw edit script.
//!
//! All passes preserve the invariant that equalities plus deletions spell
//! the old text and equalities plus insertions spell the new text.

use super::text::{Edit, Op};

/// Byte length of the longest common prefix, on a char boundary.
pub(crate) fn common_prefix(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len_utf8())
        .sum()
}

/// Byte length of the longest common suffix, on a char boundary.
pub(crate) fn common_suffix(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len_utf8())
        .sum()
}

/// Longest suffix of `a` that is also a prefix of `b`, in bytes.
pub(crate) fn common_overlap(a: &str, b: &str) -> usize {
    let max = a.len().min(b.len());
    (1..=max)
        .rev()
        .find(|&k| {
            b.is_char_boundary(k) && a.is_char_boundary(a.len() - k) && a.ends_with(&b[..k])
        })
        .unwrap_or(0)
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Coalesce runs of edits, factor shared affixes out of delete/insert
/// pairs, and slide lone edits across neighbouring equalities.
pub(crate) fn cleanup_merge(edits: &mut Vec<Edit>) {
    edits.push(Edit::equal(""));
    let mut pointer = 0;
    let mut count_delete = 0;
    let mut count_insert = 0;
    let mut text_delete = String::new();
    let mut text_insert = String::new();

    while pointer < edits.len() {
        match edits[pointer].op {
            Op::Insert => {
                count_insert += 1;
                text_insert.push_str(&edits[pointer].text);
                pointer += 1;
            }
            Op::Delete => {
                count_delete += 1;
                text_delete.push_str(&edits[pointer].text);
                pointer += 1;
            }
            Op::Equal => {
                if count_delete + count_insert > 1 {
                    if count_delete != 0 && count_insert != 0 {
                        let prefix = common_prefix(&text_insert, &text_delete);
                        if prefix != 0 {
                            let start = pointer - count_delete - count_insert;
                            if start > 0 && edits[start - 1].op == Op::Equal {
                                edits[start - 1].text.push_str(&text_insert[..prefix]);
                            } else {
                                edits.insert(0, Edit::equal(&text_insert[..prefix]));
                                pointer += 1;
                            }
                            text_insert.replace_range(..prefix, "");
                            text_delete.replace_range(..prefix, "");
                        }
                        let suffix = common_suffix(&text_insert, &text_delete);
                        if suffix != 0 {
                            let tail = &text_insert[text_insert.len() - suffix..];
                            edits[pointer].text.insert_str(0, tail);
                            text_insert.truncate(text_insert.len() - suffix);
                            text_delete.truncate(text_delete.len() - suffix);
                        }
                    }
                    let start = pointer - count_delete - count_insert;
                    edits.drain(start..pointer);
                    pointer = start;
                    if !text_delete.is_empty() {
                        edits.insert(pointer, Edit::delete(text_delete.as_str()));
                        pointer += 1;
                    }
                    if !text_insert.is_empty() {
                        edits.insert(pointer, Edit::insert(text_insert.as_str()));
                        pointer += 1;
                    }
                    pointer += 1;
                } else if pointer != 0 && edits[pointer - 1].op == Op::Equal {
                    let text = edits.remove(pointer).text;
                    edits[pointer - 1].text.push_str(&text);
                } else {
                    pointer += 1;
                }
                count_delete = 0;
                count_insert = 0;
                text_delete.clear();
                text_insert.clear();
            }
        }
    }
    if edits.last().is_some_and(|e| e.text.is_empty()) {
        edits.pop();
    }

    // Second pass: a single edit between two equalities may slide over one
    // of them entirely, e.g. A<ins>BA</ins>C -> <ins>AB</ins>AC.
    let mut changes = false;
    let mut pointer = 1;
    while pointer + 1 < edits.len() {
        if edits[pointer - 1].op == Op::Equal && edits[pointer + 1].op == Op::Equal {
            let prev = edits[pointer - 1].text.clone();
            let next = edits[pointer + 1].text.clone();
            if edits[pointer].text.ends_with(prev.as_str()) {
                let cur = &edits[pointer].text;
                let shifted = format!("{prev}{}", &cur[..cur.len() - prev.len()]);
                edits[pointer].text = shifted;
                edits[pointer + 1].text = format!("{prev}{next}");
                edits.remove(pointer - 1);
                changes = true;
            } else if edits[pointer].text.starts_with(next.as_str()) {
                edits[pointer - 1].text.push_str(&next);
                let cur = &edits[pointer].text;
                let shifted = format!("{}{next}", &cur[next.len()..]);
                edits[pointer].text = shifted;
                edits.remove(pointer + 1);
                changes = true;
            }
        }
        pointer += 1;
    }
    if changes {
        cleanup_merge(edits);
    }
}

/// Remove equalities too short to be meaningful next to the edits around
/// them, align edits to word boundaries, and split out overlaps between a
/// deletion and the following insertion.
pub(crate) fn cleanup_semantic(edits: &mut Vec<Edit>) {
    let mut changes = false;
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<String> = None;
    let mut pointer = 0;
    // Edit lengths before and after the last equality.
    let (mut ins_before, mut del_before) = (0usize, 0usize);
    let (mut ins_after, mut del_after) = (0usize, 0usize);

    while pointer < edits.len() {
        if edits[pointer].op == Op::Equal {
            equalities.push(pointer);
            ins_before = ins_after;
            del_before = del_after;
            ins_after = 0;
            del_after = 0;
            last_equality = Some(edits[pointer].text.clone());
        } else {
            let len = char_len(&edits[pointer].text);
            if edits[pointer].op == Op::Insert {
                ins_after += len;
            } else {
                del_after += len;
            }
            let collapse = last_equality.as_deref().is_some_and(|eq| {
                let eq_len = char_len(eq);
                eq_len <= ins_before.max(del_before) && eq_len <= ins_after.max(del_after)
            });
            if collapse {
                let last_index = equalities.last().copied();
                if let (Some(eq), Some(idx)) = (last_equality.take(), last_index) {
                    edits.insert(idx, Edit::delete(eq));
                    edits[idx + 1].op = Op::Insert;
                    equalities.pop();
                    equalities.pop();
                    ins_before = 0;
                    del_before = 0;
                    ins_after = 0;
                    del_after = 0;
                    changes = true;
                    pointer = equalities.last().map_or(0, |&i| i + 1);
                    continue;
                }
            }
        }
        pointer += 1;
    }

    if changes {
        cleanup_merge(edits);
    }
    cleanup_semantic_lossless(edits);

    let mut pointer = 1;
    while pointer < edits.len() {
        if edits[pointer - 1].op == Op::Delete && edits[pointer].op == Op::Insert {
            let deletion = edits[pointer - 1].text.clone();
            let insertion = edits[pointer].text.clone();
            let overlap_del = common_overlap(&deletion, &insertion);
            let overlap_ins = common_overlap(&insertion, &deletion);
            if overlap_del >= overlap_ins {
                if overlap_del * 2 >= deletion.len() || overlap_del * 2 >= insertion.len() {
                    edits.insert(pointer, Edit::equal(&insertion[..overlap_del]));
                    edits[pointer - 1].text = deletion[..deletion.len() - overlap_del].to_string();
                    edits[pointer + 1].text = insertion[overlap_del..].to_string();
                    pointer += 1;
                }
            } else if overlap_ins * 2 >= deletion.len() || overlap_ins * 2 >= insertion.len() {
                edits.insert(pointer, Edit::equal(&deletion[..overlap_ins]));
                edits[pointer - 1] = Edit::insert(&insertion[..insertion.len() - overlap_ins]);
                edits[pointer + 1] = Edit::delete(&deletion[overlap_ins..]);
                pointer += 1;
            }
            pointer += 1;
        }
        pointer += 1;
    }
}

/// Slide single edits surrounded by equalities to the most natural
/// boundary (blank line, line break, sentence end, whitespace, punctuation).
fn cleanup_semantic_lossless(edits: &mut Vec<Edit>) {
    let mut pointer = 1;
    while pointer + 1 < edits.len() {
        if edits[pointer - 1].op == Op::Equal && edits[pointer + 1].op == Op::Equal {
            let mut equality1 = edits[pointer - 1].text.clone();
            let mut edit = edits[pointer].text.clone();
            let mut equality2 = edits[pointer + 1].text.clone();

            let offset = common_suffix(&equality1, &edit);
            if offset > 0 {
                let common = edit[edit.len() - offset..].to_string();
                equality1.truncate(equality1.len() - offset);
                edit = format!("{common}{}", &edit[..edit.len() - offset]);
                equality2.insert_str(0, &common);
            }

            let mut best = (equality1.clone(), edit.clone(), equality2.clone());
            let mut best_score = boundary_score(&equality1, &edit) + boundary_score(&edit, &equality2);
            while let (Some(c1), Some(c2)) = (edit.chars().next(), equality2.chars().next()) {
                if c1 != c2 {
                    break;
                }
                equality1.push(c1);
                edit = format!("{}{c1}", &edit[c1.len_utf8()..]);
                equality2.replace_range(..c2.len_utf8(), "");
                let score = boundary_score(&equality1, &edit) + boundary_score(&edit, &equality2);
                // >= favours the rightmost of equally good positions.
                if score >= best_score {
                    best_score = score;
                    best = (equality1.clone(), edit.clone(), equality2.clone());
                }
            }

            if edits[pointer - 1].text != best.0 {
                let (best1, best_edit, best2) = best;
                if best1.is_empty() {
                    edits.remove(pointer - 1);
                    pointer -= 1;
                } else {
                    edits[pointer - 1].text = best1;
                }
                edits[pointer].text = best_edit;
                if best2.is_empty() {
                    edits.remove(pointer + 1);
                    pointer = pointer.saturating_sub(1);
                } else {
                    edits[pointer + 1].text = best2;
                }
            }
        }
        pointer += 1;
    }
}

/// Score how natural a split between `one` and `two` is, 0 (worst) to 6.
fn boundary_score(one: &str, two: &str) -> u8 {
    let (Some(c1), Some(c2)) = (one.chars().next_back(), two.chars().next()) else {
        return 6;
    };

    let non_alnum1 = !c1.is_alphanumeric();
    let non_alnum2 = !c2.is_alphanumeric();
    let whitespace1 = non_alnum1 && c1.is_whitespace();
    let whitespace2 = non_alnum2 && c2.is_whitespace();
    let line_break1 = whitespace1 && c1.is_control();
    let line_break2 = whitespace2 && c2.is_control();
    let blank_line1 = line_break1 && (one.ends_with("\n\n") || one.ends_with("\n\r\n"));
    let blank_line2 = line_break2 && starts_with_blank_line(two);

    if blank_line1 || blank_line2 {
        5
    } else if line_break1 || line_break2 {
        4
    } else if non_alnum1 && !whitespace1 && whitespace2 {
        3
    } else if whitespace1 || whitespace2 {
        2
    } else if non_alnum1 || non_alnum2 {
        1
    } else {
        0
    }
}

fn starts_with_blank_line(text: &str) -> bool {
    let rest = text.strip_prefix('\r').unwrap_or(text);
    let Some(rest) = rest.strip_prefix('\n') else {
        return false;
    };
    let rest = rest.strip_prefix('\r').unwrap_or(rest);
    rest.starts_with('\n')
}
