//! Unit tests for `Android.mk` generation.

use droidgen::mk_gen::generate;
use droidgen::model::{
    BuildKind, Library, LibraryKind, Module, ModuleKind, Project, Source, Tags,
};
use rstest::rstest;

fn source(name: &str) -> Source {
    Source {
        name: name.into(),
        generator: None,
    }
}

#[rstest]
fn generate_full_platform_tree_module() {
    let mut project = Project::new("gst".into(), BuildKind::External, Some("/root".into()));
    let mut module = Module::new("foo".into(), ModuleKind::SharedLibrary);
    module.sources.push(source("foo.c"));
    module.cflags.insert("-DX".into());
    module.cppflags.insert("-DPRE".into());
    module.cxxflags.insert("-fno-rtti".into());
    module.includes.insert("$(LOCAL_PATH)/include".into());
    module.header_target = Some("gst".into());
    module.headers.push("foo.h".into());
    module
        .libraries
        .push(Library::new("z".into(), LibraryKind::Ndk));
    module
        .libraries
        .push(Library::new("expat".into(), LibraryKind::External));
    module
        .libraries
        .push(Library::new("-Wl,-z,defs".into(), LibraryKind::Flag));
    module
        .libfilters
        .push(Library::new("expat".into(), LibraryKind::Static));
    module.tags.insert(Tags::USER);
    module.passthrough.push("LOCAL_PRELINK_MODULE := false".into());
    project.modules.push(module);
    project.subdirs.push("ext".into());

    let makefile = generate(&project);
    let expected = concat!(
        "# Android.mk for gst, generated by droidgen\n",
        "LOCAL_PATH := $(call my-dir)\n\n",
        "include $(CLEAR_VARS)\n",
        "LOCAL_MODULE := foo\n",
        "LOCAL_MODULE_TAGS := user\n",
        "LOCAL_SRC_FILES := foo.c\n",
        "LOCAL_CFLAGS := -DPRE -DX\n",
        "LOCAL_CPPFLAGS := -fno-rtti\n",
        "LOCAL_C_INCLUDES := $(LOCAL_PATH)/include\n",
        "LOCAL_COPY_HEADERS_TO := gst\n",
        "LOCAL_COPY_HEADERS := foo.h\n",
        "LOCAL_SHARED_LIBRARIES := libz\n",
        "LOCAL_STATIC_LIBRARIES := libexpat\n",
        "LOCAL_LDFLAGS := -Wl,-z,defs\n",
        "LOCAL_PRELINK_MODULE := false\n",
        "include $(BUILD_SHARED_LIBRARY)\n\n",
        "include $(LOCAL_PATH)/ext/Android.mk\n",
    );
    assert_eq!(makefile, expected);
}

#[rstest]
fn ndk_build_links_bundled_libraries_from_the_toolchain() {
    let mut project = Project::new("demo".into(), BuildKind::Ndk, None);
    let mut module = Module::new("app".into(), ModuleKind::Executable);
    module.sources.push(source("main.c"));
    module
        .libraries
        .push(Library::new("m".into(), LibraryKind::Ndk));
    module
        .libraries
        .push(Library::new("z".into(), LibraryKind::Ndk));
    project.modules.push(module);

    let makefile = generate(&project);
    assert!(makefile.contains("LOCAL_LDLIBS := -lm -lz\n"));
    assert!(!makefile.contains("LOCAL_SHARED_LIBRARIES"));
    assert!(makefile.contains("include $(BUILD_EXECUTABLE)\n"));
}

#[rstest]
fn empty_sections_are_omitted() {
    let mut project = Project::new("bare".into(), BuildKind::Ndk, None);
    project
        .modules
        .push(Module::new("stub".into(), ModuleKind::StaticLibrary));

    let makefile = generate(&project);
    let expected = concat!(
        "# Android.mk for bare, generated by droidgen\n",
        "LOCAL_PATH := $(call my-dir)\n\n",
        "include $(CLEAR_VARS)\n",
        "LOCAL_MODULE := stub\n",
        "include $(BUILD_STATIC_LIBRARY)\n\n",
    );
    assert_eq!(makefile, expected);
}

#[rstest]
fn host_modules_use_host_build_includes() {
    for (kind, include) in [
        (ModuleKind::HostSharedLibrary, "BUILD_HOST_SHARED_LIBRARY"),
        (ModuleKind::HostStaticLibrary, "BUILD_HOST_STATIC_LIBRARY"),
        (ModuleKind::HostExecutable, "BUILD_HOST_EXECUTABLE"),
    ] {
        let mut project = Project::new("host".into(), BuildKind::Ndk, None);
        project.modules.push(Module::new("tool".into(), kind));
        assert!(generate(&project).contains(&format!("include $({include})\n")));
    }
}
