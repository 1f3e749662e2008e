use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tagfmt::{decode_complete, Encode, Value};

fn sample_request() -> Value {
    Value::typed_map(
        "org.glite.authz.xacml.ctx.Attribute",
        vec![
            (Value::string("id"), Value::string("x-urn:oasis:names:tc:xacml:1.0:subject:subject-id")),
            (Value::string("datatype"), Value::string("http://www.w3.org/2001/XMLSchema#string")),
            (
                Value::string("values"),
                Value::list(vec![Value::string("/C=EU/O=Example/CN=Jane Doe")]),
            ),
        ],
    )
}

fn encode_roundtrip(value: &Value) -> Value {
    let bytes = value.encode_detached();
    decode_complete(&bytes).unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let value = sample_request();

    c.bench_function("encode_attribute", |b| {
        b.iter(|| black_box(&value).encode_detached())
    });

    c.bench_function("roundtrip_attribute", |b| {
        b.iter(|| encode_roundtrip(black_box(&value)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
