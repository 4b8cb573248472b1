//! Dispatch helpers over the element-type variants of [`Array`](crate::Array).

/// Match an array on its storage variant.
///
/// `$data` binds the typed `ArrayD<T>` of a plain array and `$rec` the
/// [`RecordArray`](crate::RecordArray) of a structured one. The plain
/// body is expanded once per element type, so it may call generic helpers.
macro_rules! dispatch {
    ($array:expr, $data:ident => $plain:expr, $rec:ident => $record:expr) => {
        match $array {
            $crate::array::Array::Bool($data) => $plain,
            $crate::array::Array::Int32($data) => $plain,
            $crate::array::Array::Int64($data) => $plain,
            $crate::array::Array::Float32($data) => $plain,
            $crate::array::Array::Float64($data) => $plain,
            $crate::array::Array::Str($data) => $plain,
            $crate::array::Array::Object($data) => $plain,
            $crate::array::Array::Record($rec) => $record,
        }
    };
}

/// Bind the Rust type for an [`ElementType`](crate::ElementType) to `$T`.
macro_rules! for_element {
    ($element:expr, $T:ident => $body:expr) => {
        match $element {
            $crate::dtype::ElementType::Bool => {
                type $T = bool;
                $body
            }
            $crate::dtype::ElementType::Int32 => {
                type $T = i32;
                $body
            }
            $crate::dtype::ElementType::Int64 => {
                type $T = i64;
                $body
            }
            $crate::dtype::ElementType::Float32 => {
                type $T = f32;
                $body
            }
            $crate::dtype::ElementType::Float64 => {
                type $T = f64;
                $body
            }
            $crate::dtype::ElementType::Str => {
                type $T = String;
                $body
            }
            $crate::dtype::ElementType::Object => {
                type $T = $crate::value::Value;
                $body
            }
        }
    };
}
