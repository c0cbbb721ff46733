use criterion::{criterion_group, criterion_main, Criterion};
use csslint_css3::parser_config::ParserConfig;
use csslint_css3::Parser;
use std::hint::black_box;

const RULE: &str = r#"
.nav > li a:hover, #main .item[data-state="open"]::before {
    color: rgba(0, 0, 0, .5);
    margin: 0 auto 10px;
    background: url("sprite.png") no-repeat left top;
    background-position: right 10px bottom 5px;
    border: 1px solid #ccc;
    box-shadow: 0 1px 2px rgba(0,0,0,.2), inset 0 0 1px #fff;
    flex: 1 1 auto;
    width: calc(100% - 20px);
}
@media screen and (min-width: 768px) {
    .nav { display: flex; }
}
"#;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");
    group.significance_level(0.1).sample_size(200);

    // Build the input outside of the closure so only parsing is measured
    let stylesheet = RULE.repeat(200);

    group.bench_function("stylesheet", |b| {
        b.iter(|| {
            let mut properties = 0;
            {
                let mut parser = Parser::new(ParserConfig::default());
                parser.add_listener(csslint_css3::event::EventType::Property, |_| properties += 1);
                parser.parse(black_box(&stylesheet)).ok();
            }
            properties
        })
    });

    group.bench_function("property value", |b| {
        let mut parser = Parser::new(ParserConfig::default());
        b.iter(|| parser.parse_property_value(black_box("0 1px 2px rgba(0,0,0,.2), inset 0 0 1px #fff")))
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
