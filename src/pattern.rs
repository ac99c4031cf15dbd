// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Extension patterns such as `c;cc;h*`, matched case-insensitively.

/// Returns true if `name` matches any of the `;`-separated patterns in `spec`.
pub fn matches_spec(spec: &str, name: &str) -> bool {
    spec.split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .any(|p| wildcard_match(p.as_bytes(), name.as_bytes()))
}

/// `*` matches any run (including an empty one), `?` matches exactly one byte.
pub fn wildcard_match(pattern: &[u8], name: &[u8]) -> bool {
    if !contains_magic(pattern) {
        return pattern.eq_ignore_ascii_case(name);
    }
    backtrack(pattern, name)
}

fn contains_magic(pattern: &[u8]) -> bool {
    pattern.iter().any(|&b| b == b'*' || b == b'?')
}

// This code is based on https://research.swtch.com/glob.go
// Extensions carry no separators, so only the single-star restart is needed.
fn backtrack(pattern: &[u8], name: &[u8]) -> bool {
    let mut px = 0;
    let mut nx = 0;
    let mut next_px = 0;
    let mut next_nx = 0;

    while px < pattern.len() || nx < name.len() {
        if px < pattern.len() {
            match pattern[px] {
                b'?' => {
                    if nx < name.len() {
                        px += 1;
                        nx += 1;
                        continue;
                    }
                }
                b'*' => {
                    next_px = px;
                    next_nx = nx + 1;
                    px += 1;
                    continue;
                }
                c => {
                    if nx < name.len() && name[nx].eq_ignore_ascii_case(&c) {
                        px += 1;
                        nx += 1;
                        continue;
                    }
                }
            }
        }

        if 0 < next_nx && next_nx <= name.len() {
            px = next_px;
            nx = next_nx;
            continue;
        }

        return false;
    }

    true
}
