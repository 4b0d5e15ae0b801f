//! 别名表校验
//!
//! 把任意 `Serialize` 值收集为“字符串键 -> 字符串值”的映射。
//! 这里直接实现 serde 的 `Serializer`：只有真正的字符串（以及 `char`、
//! 单元枚举变体）被接受，整数键或数字值不会被悄悄转成字符串。

use crate::errors::ConfigError;
use serde::ser::{self, Impossible, Serialize};
use std::collections::BTreeMap;
use std::fmt;

type Table = BTreeMap<String, String>;

/// 校验并收集别名表，失败时不产生任何部分结果
pub(crate) fn alias_table<M: Serialize + ?Sized>(mapping: &M) -> Result<Table, ConfigError> {
    mapping
        .serialize(TableSerializer)
        .map_err(|e| ConfigError::InvalidAliases(e.0))
}

#[derive(Debug)]
struct ShapeError(String);

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ShapeError {}

impl ser::Error for ShapeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        ShapeError(msg.to_string())
    }
}

/// 为不接受的标量生成拒绝方法
macro_rules! reject_scalars {
    ($($method:ident($ty:ty) => $kind:expr),* $(,)?) => {
        $(
            fn $method(self, _value: $ty) -> Result<Self::Ok, Self::Error> {
                Err(Self::reject($kind))
            }
        )*
    };
}

/// 顶层：只接受映射或结构体
struct TableSerializer;

impl TableSerializer {
    fn reject(kind: &str) -> ShapeError {
        ShapeError(format!("expected a map, found {}", kind))
    }
}

impl ser::Serializer for TableSerializer {
    type Ok = Table;
    type Error = ShapeError;
    type SerializeSeq = Impossible<Table, ShapeError>;
    type SerializeTuple = Impossible<Table, ShapeError>;
    type SerializeTupleStruct = Impossible<Table, ShapeError>;
    type SerializeTupleVariant = Impossible<Table, ShapeError>;
    type SerializeMap = TableBuilder;
    type SerializeStruct = TableBuilder;
    type SerializeStructVariant = Impossible<Table, ShapeError>;

    reject_scalars! {
        serialize_bool(bool) => "a boolean",
        serialize_i8(i8) => "a number",
        serialize_i16(i16) => "a number",
        serialize_i32(i32) => "a number",
        serialize_i64(i64) => "a number",
        serialize_u8(u8) => "a number",
        serialize_u16(u16) => "a number",
        serialize_u32(u32) => "a number",
        serialize_u64(u64) => "a number",
        serialize_f32(f32) => "a number",
        serialize_f64(f64) => "a number",
        serialize_char(char) => "a string",
        serialize_str(&str) => "a string",
        serialize_bytes(&[u8]) => "bytes",
    }

    fn serialize_none(self) -> Result<Table, ShapeError> {
        Err(Self::reject("null"))
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Table, ShapeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Table, ShapeError> {
        Err(Self::reject("null"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Table, ShapeError> {
        Err(Self::reject("null"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Table, ShapeError> {
        Err(Self::reject("an enum variant"))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Table, ShapeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Table, ShapeError> {
        Err(Self::reject("an enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, ShapeError> {
        Err(Self::reject("a sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, ShapeError> {
        Err(Self::reject("a sequence"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, ShapeError> {
        Err(Self::reject("a sequence"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, ShapeError> {
        Err(Self::reject("an enum variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<TableBuilder, ShapeError> {
        Ok(TableBuilder::default())
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<TableBuilder, ShapeError> {
        Ok(TableBuilder::default())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, ShapeError> {
        Err(Self::reject("an enum variant"))
    }
}

/// 逐条收集映射项
#[derive(Default)]
struct TableBuilder {
    entries: Table,
    pending_alias: Option<String>,
}

impl TableBuilder {
    fn insert<T>(&mut self, alias: String, target: &T) -> Result<(), ShapeError>
    where
        T: ?Sized + Serialize,
    {
        let target = target.serialize(StringSerializer).map_err(|e| {
            ShapeError(format!("alias '{}' maps to {} instead of a string", alias, e.0))
        })?;
        self.entries.insert(alias, target);
        Ok(())
    }
}

impl ser::SerializeMap for TableBuilder {
    type Ok = Table;
    type Error = ShapeError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), ShapeError> {
        let alias = key
            .serialize(StringSerializer)
            .map_err(|e| ShapeError(format!("alias keys must be strings, found {}", e.0)))?;
        self.pending_alias = Some(alias);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), ShapeError> {
        let alias = self
            .pending_alias
            .take()
            .ok_or_else(|| ShapeError("map value serialized before its key".to_string()))?;
        self.insert(alias, value)
    }

    fn end(self) -> Result<Table, ShapeError> {
        Ok(self.entries)
    }
}

impl ser::SerializeStruct for TableBuilder {
    type Ok = Table;
    type Error = ShapeError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), ShapeError> {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Table, ShapeError> {
        Ok(self.entries)
    }
}

/// 键与值：只接受字符串，错误里只带值的种类，由调用方补全上下文
struct StringSerializer;

impl StringSerializer {
    fn reject(kind: &str) -> ShapeError {
        ShapeError(kind.to_string())
    }
}

impl ser::Serializer for StringSerializer {
    type Ok = String;
    type Error = ShapeError;
    type SerializeSeq = Impossible<String, ShapeError>;
    type SerializeTuple = Impossible<String, ShapeError>;
    type SerializeTupleStruct = Impossible<String, ShapeError>;
    type SerializeTupleVariant = Impossible<String, ShapeError>;
    type SerializeMap = Impossible<String, ShapeError>;
    type SerializeStruct = Impossible<String, ShapeError>;
    type SerializeStructVariant = Impossible<String, ShapeError>;

    reject_scalars! {
        serialize_bool(bool) => "a boolean",
        serialize_i8(i8) => "a number",
        serialize_i16(i16) => "a number",
        serialize_i32(i32) => "a number",
        serialize_i64(i64) => "a number",
        serialize_u8(u8) => "a number",
        serialize_u16(u16) => "a number",
        serialize_u32(u32) => "a number",
        serialize_u64(u64) => "a number",
        serialize_f32(f32) => "a number",
        serialize_f64(f64) => "a number",
        serialize_bytes(&[u8]) => "bytes",
    }

    fn serialize_char(self, value: char) -> Result<String, ShapeError> {
        Ok(value.to_string())
    }

    fn serialize_str(self, value: &str) -> Result<String, ShapeError> {
        Ok(value.to_string())
    }

    fn serialize_none(self) -> Result<String, ShapeError> {
        Err(Self::reject("null"))
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<String, ShapeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String, ShapeError> {
        Err(Self::reject("null"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String, ShapeError> {
        Err(Self::reject("null"))
    }

    // 单元变体按变体名序列化，与 toml 的处理一致
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String, ShapeError> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, ShapeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String, ShapeError> {
        Err(Self::reject("an enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, ShapeError> {
        Err(Self::reject("a sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, ShapeError> {
        Err(Self::reject("a sequence"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, ShapeError> {
        Err(Self::reject("a sequence"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, ShapeError> {
        Err(Self::reject("an enum variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, ShapeError> {
        Err(Self::reject("a map"))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, ShapeError> {
        Err(Self::reject("a map"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, ShapeError> {
        Err(Self::reject("an enum variant"))
    }
}
