// Property-based tests for the encoding layer.

use aidb_codec::encoding::varint::{packed_len_u32, packed_len_u64, unpack_int, unpack_long};
use aidb_codec::serializer::{
    ByteArraySerializer, DoubleArraySerializer, FloatArraySerializer, StringSerializer,
};
use aidb_codec::{DataInput, DataOutput, Serializer};
use proptest::prelude::*;
use std::cmp::Ordering;

/// Finite floats only: NaN makes `compare` non-total by design.
fn finite_f32() -> impl Strategy<Value = f32> {
    any::<f32>().prop_filter("finite", |f| f.is_finite())
}

fn float_array() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(finite_f32(), 0..16)
}

proptest! {
    #[test]
    fn prop_pack_int_round_trip(v in any::<u32>()) {
        let mut out = DataOutput::new();
        out.pack_int(v);
        let bytes = out.finalize();
        prop_assert_eq!(bytes.len(), packed_len_u32(v));
        prop_assert_eq!(unpack_int(&bytes).unwrap(), (v, bytes.len()));
    }

    #[test]
    fn prop_pack_long_round_trip(v in any::<u64>()) {
        let mut out = DataOutput::new();
        out.pack_long(v);
        let bytes = out.finalize();
        prop_assert_eq!(bytes.len(), packed_len_u64(v));
        prop_assert_eq!(unpack_long(&bytes).unwrap(), (v, bytes.len()));
    }

    #[test]
    fn prop_packed_len_monotonic(a in any::<u64>(), b in any::<u64>()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(packed_len_u64(lo) <= packed_len_u64(hi));
    }

    #[test]
    fn prop_pack_long_array_matches_single(values in prop::collection::vec(any::<u64>(), 0..64)) {
        let mut batch = DataOutput::new();
        batch.pack_long_array(&values);

        let mut single = DataOutput::new();
        for &v in &values {
            single.pack_long(v);
        }
        prop_assert_eq!(batch.finalize(), single.finalize());
    }

    #[test]
    fn prop_buffer_preserves_bytes(
        chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..300), 0..20),
        initial in 0usize..9,
    ) {
        let mut out = DataOutput::with_capacity(1 << initial);
        let mut expected = Vec::new();
        for chunk in &chunks {
            let before = expected.len();
            out.write_bytes(chunk);
            expected.extend_from_slice(chunk);
            prop_assert_eq!(&out.as_slice()[..before], &expected[..before]);
        }
        prop_assert_eq!(out.finalize(), expected);
    }

    #[test]
    fn prop_text_round_trip(s in any::<String>()) {
        let mut out = DataOutput::new();
        out.write_text(&s);
        let bytes = out.finalize();
        let mut input = DataInput::new(&bytes);
        prop_assert_eq!(input.read_text().unwrap(), s);
        prop_assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn prop_float_array_round_trip(v in prop::collection::vec(any::<f32>(), 0..32)) {
        let ser = FloatArraySerializer;
        let bytes = ser.serialize_to_vec(&v);
        let decoded = ser.deserialize_from_slice(&bytes).unwrap();
        prop_assert!(ser.equals(&decoded, &v));
        prop_assert_eq!(ser.serialize_to_vec(&decoded), bytes);
    }

    #[test]
    fn prop_double_array_round_trip(v in prop::collection::vec(any::<f64>(), 0..32)) {
        let ser = DoubleArraySerializer;
        let bytes = ser.serialize_to_vec(&v);
        let decoded = ser.deserialize_from_slice(&bytes).unwrap();
        prop_assert!(ser.equals(&decoded, &v));
    }

    #[test]
    fn prop_equal_values_hash_equal(v in prop::collection::vec(any::<f32>(), 0..32), seed in any::<i32>()) {
        let ser = FloatArraySerializer;
        let copy = ser.deserialize_from_slice(&ser.serialize_to_vec(&v)).unwrap();
        prop_assert!(ser.equals(&v, &copy));
        prop_assert_eq!(ser.hash(&v, seed), ser.hash(&copy, seed));
    }

    #[test]
    fn prop_float_compare_antisymmetric(a in float_array(), b in float_array()) {
        let ser = FloatArraySerializer;
        prop_assert_eq!(ser.compare(&a, &b), ser.compare(&b, &a).reverse());
        prop_assert_eq!(ser.compare(&a, &a.clone()), Ordering::Equal);
    }

    #[test]
    fn prop_float_compare_transitive(a in float_array(), b in float_array(), c in float_array()) {
        let ser = FloatArraySerializer;
        let mut sorted = [a, b, c];
        sorted.sort_by(|x, y| ser.compare(x, y));
        prop_assert_ne!(ser.compare(&sorted[0], &sorted[1]), Ordering::Greater);
        prop_assert_ne!(ser.compare(&sorted[1], &sorted[2]), Ordering::Greater);
        prop_assert_ne!(ser.compare(&sorted[0], &sorted[2]), Ordering::Greater);
    }

    #[test]
    fn prop_strict_prefix_is_less(a in float_array(), extra in prop::collection::vec(finite_f32(), 1..8)) {
        let ser = FloatArraySerializer;
        let mut longer = a.clone();
        longer.extend(extra);
        prop_assert_eq!(ser.compare(&a, &longer), Ordering::Less);
    }

    #[test]
    fn prop_byte_array_round_trip(v in prop::collection::vec(any::<u8>(), 0..512), seed in any::<i32>()) {
        let ser = ByteArraySerializer;
        let decoded = ser.deserialize_from_slice(&ser.serialize_to_vec(&v)).unwrap();
        prop_assert!(ser.equals(&decoded, &v));
        prop_assert_eq!(ser.hash(&decoded, seed), ser.hash(&v, seed));
    }

    #[test]
    fn prop_string_compare_matches_utf16(a in any::<String>(), b in any::<String>()) {
        let ser = StringSerializer;
        let ua: Vec<u16> = a.encode_utf16().collect();
        let ub: Vec<u16> = b.encode_utf16().collect();
        prop_assert_eq!(ser.compare(&a, &b), ua.cmp(&ub));
    }
}
