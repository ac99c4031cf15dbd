// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use crystal_lex::{Cookie, CookieCache, LanguageRegistry, TextType};

const C_SOURCE: &str = r#"#include <stdio.h>
/* A block comment
   that spans lines. */
static int count(const char *s) {
    int n = 0; // trailing
    while (*s++) n += 0x1f;
    return printf("%d\n", n);
}
"#;

const HTML_SOURCE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><style>body { margin: 0 auto; color: #333; }</style></head>
<body onload="init()">
<!-- navigation -->
<script type="text/javascript">
  var items = [1, 2, 3];
  function init() { return items.length; }
</script>
<p class=lead>&copy; 2024 &amp; more</p>
</body>
</html>
"#;

const RAZOR_SOURCE: &str = r#"@model IndexViewModel
@{ var title = "Home"; }
<h1>@title</h1>
@* a comment *@
@foreach (var item in Model.Items) {
    <li>@item.Name (@(item.Count + 1))</li>
}
<p>mail@example.com @@handle</p>
"#;

fn lines(text: &str, copies: usize) -> Vec<Vec<char>> {
    text.lines().cycle().take(text.lines().count() * copies).map(|l| l.chars().collect()).collect()
}

fn bench_lexers(c: &mut Criterion) {
    let registry = LanguageRegistry::new();
    let mut group = c.benchmark_group("lex");

    for (name, text_type, source) in [
        ("c", TextType::C, C_SOURCE),
        ("html", TextType::Html, HTML_SOURCE),
        ("razor", TextType::Cshtml, RAZOR_SOURCE),
    ] {
        let Some(definition) = registry.by_type(text_type) else {
            continue;
        };
        let input = lines(source, 64);
        group.throughput(Throughput::Elements(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, lines| {
            b.iter(|| {
                let mut cookie = Cookie::default();
                for line in lines {
                    let (spans, next) = definition.lex(cookie, line, line.len());
                    black_box(spans);
                    cookie = next;
                }
                cookie
            })
        });
    }

    group.finish();
}

fn bench_cache(c: &mut Criterion) {
    let registry = LanguageRegistry::new();
    let Some(html) = registry.by_type(TextType::Html) else {
        return;
    };
    let source = lines(HTML_SOURCE, 256);

    c.bench_function("cache/cold_fill", |b| {
        b.iter(|| {
            let mut cache = CookieCache::new(html.shared_lexer(), source.len());
            black_box(cache.cookie_for(&source, source.len() - 1))
        })
    });
}

criterion_group!(benches, bench_lexers, bench_cache);
criterion_main!(benches);
