//! Minimal translation units compiled against the header.

use serde::Serialize;

/// Source language of a translation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// C, checked with `_Static_assert`.
    C,
    /// C++, checked with `static_assert` and type traits.
    Cxx,
}

/// A generated program that only compiles if the header layout is as expected.
#[derive(Debug, Clone, Copy)]
pub struct TranslationUnit {
    /// Source language.
    pub language: Language,
    /// File name inside the temporary directory.
    pub file_name: &'static str,
    /// Output binary name inside the temporary directory.
    pub output_name: &'static str,
    /// Program text.
    pub source: &'static str,
}

/// C mode: the header must be valid C and the structures must have the
/// expected sizes and alignment.
pub const C_UNIT: TranslationUnit = TranslationUnit {
    language: Language::C,
    file_name: "abi_check.c",
    output_name: "abi_check_c.out",
    source: r#"
#include <stddef.h>
#include <stdint.h>

#include <vix/ffi/vix_ffi.h>

int main(void)
{
  (void)VIX_FFI_ABI_VERSION_MAJOR;
  (void)VIX_FFI_ABI_VERSION_MINOR;

  _Static_assert(sizeof(vix_str) == sizeof(void *) + sizeof(size_t), "vix_str shape");
  _Static_assert(sizeof(vix_buf) == sizeof(void *) + sizeof(size_t), "vix_buf shape");
  _Static_assert(sizeof(vix_mut_buf) == sizeof(void *) + sizeof(size_t), "vix_mut_buf shape");
  _Static_assert(sizeof(vix_allocator) == 3 * sizeof(void *), "vix_allocator shape");

  _Static_assert(_Alignof(vix_str) == _Alignof(void *), "vix_str alignment");
  _Static_assert(_Alignof(vix_buf) == _Alignof(void *), "vix_buf alignment");
  _Static_assert(_Alignof(vix_mut_buf) == _Alignof(void *), "vix_mut_buf alignment");
  _Static_assert(_Alignof(vix_allocator) == _Alignof(void *), "vix_allocator alignment");
  _Static_assert(_Alignof(vix_status) >= _Alignof(vix_str), "vix_status alignment");

  return 0;
}
"#,
};

/// C++ mode: additionally every structure must be standard layout and
/// trivially copyable.
pub const CXX_UNIT: TranslationUnit = TranslationUnit {
    language: Language::Cxx,
    file_name: "abi_check.cpp",
    output_name: "abi_check_cpp.out",
    source: r#"
#include <cstddef>
#include <cstdint>
#include <type_traits>

#include <vix/ffi/vix_ffi.h>

template <typename T>
static constexpr bool is_c_compatible()
{
  return std::is_standard_layout_v<T> && std::is_trivially_copyable_v<T>;
}

static void check_layout()
{
  static_assert(is_c_compatible<vix_str>(), "vix_str must be standard layout and trivially copyable");
  static_assert(is_c_compatible<vix_buf>(), "vix_buf must be standard layout and trivially copyable");
  static_assert(is_c_compatible<vix_mut_buf>(), "vix_mut_buf must be standard layout and trivially copyable");
  static_assert(is_c_compatible<vix_status>(), "vix_status must be standard layout and trivially copyable");
  static_assert(is_c_compatible<vix_allocator>(), "vix_allocator must be standard layout and trivially copyable");
}

static void check_sizes()
{
  static_assert(sizeof(vix_str) == sizeof(void *) + sizeof(size_t), "vix_str shape");
  static_assert(sizeof(vix_buf) == sizeof(void *) + sizeof(size_t), "vix_buf shape");
  static_assert(sizeof(vix_mut_buf) == sizeof(void *) + sizeof(size_t), "vix_mut_buf shape");
  static_assert(sizeof(vix_allocator) == 3 * sizeof(void *), "vix_allocator shape");

  static_assert(alignof(vix_str) == alignof(void *), "vix_str alignment");
  static_assert(alignof(vix_buf) == alignof(void *), "vix_buf alignment");
  static_assert(alignof(vix_mut_buf) == alignof(void *), "vix_mut_buf alignment");
  static_assert(alignof(vix_allocator) == alignof(void *), "vix_allocator alignment");
  static_assert(alignof(vix_status) >= alignof(vix_str), "vix_status alignment");
}

int main()
{
  (void)VIX_FFI_ABI_VERSION_MAJOR;
  (void)VIX_FFI_ABI_VERSION_MINOR;

  check_layout();
  check_sizes();
  return 0;
}
"#,
};
