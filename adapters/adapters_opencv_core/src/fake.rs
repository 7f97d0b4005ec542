//! In-process stand-in for the native core library, used by unit tests.
//!
//! Headers are real `CvMat`/`IplImage` allocations so the handles can read
//! them; element storage is a sparse map per array. Every call is recorded
//! by its native name.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use entities_mat_types::type_code::{make_type, MAT_CONTINUOUS_FLAG, MAT_HEADER_SIGNATURE};
use entities_mat_types::{CvRect, CvScalar, CvSize, IplDepth};
use infrastructure_opencv_bindings::{CvArr, CvMat, IplImage, IplROI};
use libc::{c_double, c_int};

use crate::native_api::CoreApi;

#[derive(Debug, Clone, Copy)]
enum Fill {
    Uniform(CvScalar),
    Identity(CvScalar),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Mat,
    Image,
}

#[derive(Debug, Clone)]
struct Store {
    kind: Kind,
    fill: Fill,
    entries: HashMap<i64, CvScalar>,
}

impl Store {
    fn new(kind: Kind) -> Self {
        Self {
            kind,
            fill: Fill::Uniform(CvScalar::default()),
            entries: HashMap::new(),
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeCore {
    calls: Mutex<Vec<&'static str>>,
    arrays: Mutex<HashMap<usize, Store>>,
    // Three-index accesses, keyed by header and index
    cells: Mutex<HashMap<(usize, [c_int; 3]), CvScalar>>,
    releases: AtomicUsize,
    fail_alloc: AtomicBool,
}

impl FakeCore {
    /// The fake plus the same instance as a trait object
    pub(crate) fn shared() -> (Arc<FakeCore>, Arc<dyn CoreApi>) {
        let core = Arc::new(FakeCore::default());
        let api: Arc<dyn CoreApi> = core.clone();
        (core, api)
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    /// Headers allocated and not yet released
    pub(crate) fn live(&self) -> usize {
        self.arrays.lock().unwrap().len()
    }

    pub(crate) fn fail_allocations(&self, fail: bool) {
        self.fail_alloc.store(fail, Ordering::SeqCst);
    }

    fn record(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }

    fn register(&self, ptr: *const CvArr, store: Store) {
        self.arrays.lock().unwrap().insert(ptr as usize, store);
    }

    unsafe fn cols(&self, arr: *const CvArr, kind: Kind) -> i64 {
        match kind {
            Kind::Mat => i64::from((*arr.cast::<CvMat>()).cols),
            Kind::Image => i64::from((*arr.cast::<IplImage>()).width),
        }
    }

    unsafe fn read(&self, arr: *const CvArr, linear: i64) -> CvScalar {
        let arrays = self.arrays.lock().unwrap();
        let Some(store) = arrays.get(&(arr as usize)) else {
            return CvScalar::default();
        };
        if let Some(v) = store.entries.get(&linear) {
            return *v;
        }
        match store.fill {
            Fill::Uniform(v) => v,
            Fill::Identity(v) => {
                let cols = self.cols(arr, store.kind);
                if linear / cols == linear % cols {
                    v
                } else {
                    CvScalar::default()
                }
            }
        }
    }

    fn write(&self, arr: *const CvArr, linear: i64, value: CvScalar) {
        if let Some(store) = self.arrays.lock().unwrap().get_mut(&(arr as usize)) {
            store.entries.insert(linear, value);
        }
    }

    fn read_cell(&self, arr: *const CvArr, index: [c_int; 3]) -> CvScalar {
        let cells = self.cells.lock().unwrap();
        cells.get(&(arr as usize, index)).copied().unwrap_or_default()
    }

    fn write_cell(&self, arr: *const CvArr, index: [c_int; 3], value: CvScalar) {
        self.cells.lock().unwrap().insert((arr as usize, index), value);
    }

    fn fill(&self, arr: *const CvArr, fill: Fill) {
        if let Some(store) = self.arrays.lock().unwrap().get_mut(&(arr as usize)) {
            store.entries.clear();
            store.fill = fill;
        }
    }

    unsafe fn linear_2d(&self, arr: *const CvArr, idx0: c_int, idx1: c_int) -> i64 {
        let kind = self
            .arrays
            .lock()
            .unwrap()
            .get(&(arr as usize))
            .map(|s| s.kind)
            .unwrap_or(Kind::Mat);
        i64::from(idx0) * self.cols(arr, kind) + i64::from(idx1)
    }

    fn forget(&self, arr: *const CvArr) {
        self.arrays.lock().unwrap().remove(&(arr as usize));
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

impl CoreApi for FakeCore {
    unsafe fn create_mat(&self, rows: c_int, cols: c_int, type_: c_int) -> *mut CvMat {
        self.record("cvCreateMat");
        if self.fail_alloc.load(Ordering::SeqCst) {
            return std::ptr::null_mut();
        }
        let mat = Box::into_raw(Box::new(CvMat {
            type_: MAT_HEADER_SIGNATURE | MAT_CONTINUOUS_FLAG | (type_ & 0xFFF),
            step: cols * 8,
            refcount: std::ptr::null_mut(),
            hdr_refcount: 0,
            data: std::ptr::null_mut(),
            rows,
            cols,
        }));
        self.register(mat.cast_const().cast(), Store::new(Kind::Mat));
        mat
    }

    unsafe fn create_image(&self, size: CvSize, depth: c_int, channels: c_int) -> *mut IplImage {
        self.record("cvCreateImage");
        if self.fail_alloc.load(Ordering::SeqCst) {
            return std::ptr::null_mut();
        }
        let mut header: IplImage = std::mem::zeroed();
        header.n_size = std::mem::size_of::<IplImage>() as c_int;
        header.n_channels = channels;
        header.depth = depth;
        header.width = size.width;
        header.height = size.height;
        header.width_step = size.width * channels * (IplDepth::from_raw(depth).bits() as c_int / 8);
        let image = Box::into_raw(Box::new(header));
        self.register(image.cast_const().cast(), Store::new(Kind::Image));
        image
    }

    unsafe fn clone_image(&self, image: *const IplImage) -> *mut IplImage {
        self.record("cvCloneImage");
        if self.fail_alloc.load(Ordering::SeqCst) {
            return std::ptr::null_mut();
        }
        let mut header = std::ptr::read(image);
        if !header.roi.is_null() {
            header.roi = Box::into_raw(Box::new(*header.roi));
        }
        let copy = Box::into_raw(Box::new(header));
        let store = self.arrays.lock().unwrap().get(&(image as usize)).cloned();
        self.register(copy.cast_const().cast(), store.unwrap_or_else(|| Store::new(Kind::Image)));
        copy
    }

    unsafe fn clone_mat(&self, mat: *const CvMat) -> *mut CvMat {
        self.record("cvCloneMat");
        if self.fail_alloc.load(Ordering::SeqCst) {
            return std::ptr::null_mut();
        }
        let copy = Box::into_raw(Box::new(std::ptr::read(mat)));
        let store = self.arrays.lock().unwrap().get(&(mat as usize)).cloned();
        self.register(copy.cast_const().cast(), store.unwrap_or_else(|| Store::new(Kind::Mat)));
        copy
    }

    unsafe fn release_mat(&self, mat: *mut *mut CvMat) {
        self.record("cvReleaseMat");
        let ptr = *mat;
        if ptr.is_null() {
            return;
        }
        self.forget(ptr.cast_const().cast());
        drop(Box::from_raw(ptr));
        *mat = std::ptr::null_mut();
    }

    unsafe fn release_image(&self, image: *mut *mut IplImage) {
        self.record("cvReleaseImage");
        let ptr = *image;
        if ptr.is_null() {
            return;
        }
        self.forget(ptr.cast_const().cast());
        let header = Box::from_raw(ptr);
        if !header.roi.is_null() {
            drop(Box::from_raw(header.roi));
        }
        *image = std::ptr::null_mut();
    }

    unsafe fn copy(&self, src: *const CvArr, dst: *mut CvArr, _mask: *const CvArr) {
        self.record("cvCopy");
        let mut arrays = self.arrays.lock().unwrap();
        if let Some(source) = arrays.get(&(src as usize)).cloned() {
            if let Some(target) = arrays.get_mut(&(dst as usize)) {
                target.entries = source.entries;
                target.fill = source.fill;
            }
        }
    }

    unsafe fn set(&self, arr: *mut CvArr, value: CvScalar, _mask: *const CvArr) {
        self.record("cvSet");
        self.fill(arr, Fill::Uniform(value));
    }

    unsafe fn add_weighted(
        &self,
        _src1: *const CvArr,
        _alpha: c_double,
        _src2: *const CvArr,
        _beta: c_double,
        _gamma: c_double,
        _dst: *mut CvArr,
    ) {
        self.record("cvAddWeighted");
    }

    unsafe fn set_identity(&self, mat: *mut CvArr, value: CvScalar) {
        self.record("cvSetIdentity");
        self.fill(mat, Fill::Identity(value));
    }

    unsafe fn transpose(&self, _src: *const CvArr, _dst: *mut CvArr) {
        self.record("cvTranspose");
    }

    unsafe fn set_zero(&self, arr: *mut CvArr) {
        self.record("cvSetZero");
        self.fill(arr, Fill::Uniform(CvScalar::default()));
    }

    unsafe fn get_elem_type(&self, arr: *const CvArr) -> c_int {
        self.record("cvGetElemType");
        let kind = self.arrays.lock().unwrap().get(&(arr as usize)).map(|s| s.kind);
        match kind {
            Some(Kind::Image) => {
                let header = &*arr.cast::<IplImage>();
                IplDepth::from_raw(header.depth)
                    .to_depth()
                    .map(|d| make_type(d, header.n_channels))
                    .unwrap_or(-1)
            }
            _ => (*arr.cast::<CvMat>()).type_ & 0xFFF,
        }
    }

    unsafe fn set_image_roi(&self, image: *mut IplImage, rect: CvRect) {
        self.record("cvSetImageROI");
        let roi = IplROI {
            coi: 0,
            x_offset: rect.x,
            y_offset: rect.y,
            width: rect.width,
            height: rect.height,
        };
        if (*image).roi.is_null() {
            (*image).roi = Box::into_raw(Box::new(roi));
        } else {
            *(*image).roi = roi;
        }
    }

    unsafe fn get_image_roi(&self, image: *const IplImage) -> CvRect {
        self.record("cvGetImageROI");
        match (*image).roi.as_ref() {
            Some(roi) => CvRect::new(roi.x_offset, roi.y_offset, roi.width, roi.height),
            None => CvRect::new(0, 0, (*image).width, (*image).height),
        }
    }

    unsafe fn reset_image_roi(&self, image: *mut IplImage) {
        self.record("cvResetImageROI");
        if !(*image).roi.is_null() {
            drop(Box::from_raw((*image).roi));
            (*image).roi = std::ptr::null_mut();
        }
    }

    unsafe fn get_1d(&self, arr: *const CvArr, idx0: c_int) -> CvScalar {
        self.record("cvGet1D");
        self.read(arr, i64::from(idx0))
    }

    unsafe fn get_2d(&self, arr: *const CvArr, idx0: c_int, idx1: c_int) -> CvScalar {
        self.record("cvGet2D");
        self.read(arr, self.linear_2d(arr, idx0, idx1))
    }

    unsafe fn get_3d(&self, arr: *const CvArr, idx0: c_int, idx1: c_int, idx2: c_int) -> CvScalar {
        self.record("cvGet3D");
        self.read_cell(arr, [idx0, idx1, idx2])
    }

    unsafe fn get_real_1d(&self, arr: *const CvArr, idx0: c_int) -> c_double {
        self.record("cvGetReal1D");
        self.read(arr, i64::from(idx0)).val[0]
    }

    unsafe fn get_real_2d(&self, arr: *const CvArr, idx0: c_int, idx1: c_int) -> c_double {
        self.record("cvGetReal2D");
        self.read(arr, self.linear_2d(arr, idx0, idx1)).val[0]
    }

    unsafe fn get_real_3d(&self, arr: *const CvArr, idx0: c_int, idx1: c_int, idx2: c_int) -> c_double {
        self.record("cvGetReal3D");
        self.read_cell(arr, [idx0, idx1, idx2]).val[0]
    }

    unsafe fn set_1d(&self, arr: *mut CvArr, idx0: c_int, value: CvScalar) {
        self.record("cvSet1D");
        self.write(arr, i64::from(idx0), value);
    }

    unsafe fn set_2d(&self, arr: *mut CvArr, idx0: c_int, idx1: c_int, value: CvScalar) {
        self.record("cvSet2D");
        let linear = self.linear_2d(arr, idx0, idx1);
        self.write(arr, linear, value);
    }

    unsafe fn set_3d(&self, arr: *mut CvArr, idx0: c_int, idx1: c_int, idx2: c_int, value: CvScalar) {
        self.record("cvSet3D");
        self.write_cell(arr, [idx0, idx1, idx2], value);
    }

    unsafe fn set_real_1d(&self, arr: *mut CvArr, idx0: c_int, value: c_double) {
        self.record("cvSetReal1D");
        self.write(arr, i64::from(idx0), CvScalar::real(value));
    }

    unsafe fn set_real_2d(&self, arr: *mut CvArr, idx0: c_int, idx1: c_int, value: c_double) {
        self.record("cvSetReal2D");
        let linear = self.linear_2d(arr, idx0, idx1);
        self.write(arr, linear, CvScalar::real(value));
    }

    unsafe fn set_real_3d(&self, arr: *mut CvArr, idx0: c_int, idx1: c_int, idx2: c_int, value: c_double) {
        self.record("cvSetReal3D");
        self.write_cell(arr, [idx0, idx1, idx2], CvScalar::real(value));
    }
}
