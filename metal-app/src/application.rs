use crate::{
    renderer::{MetalRenderer, RendererDelgate},
    AppConfig, AppError, Unit, UserEvent,
};
use cocoa::{
    appkit::{
        NSApp, NSApplication, NSApplicationActivationPolicy::NSApplicationActivationPolicyRegular,
        NSBackingStoreType::NSBackingStoreBuffered, NSEvent, NSMenu, NSMenuItem, NSView, NSWindow,
        NSWindowStyleMask,
    },
    base::{id, nil, selector},
    foundation::{NSAutoreleasePool, NSPoint, NSRect, NSSize, NSString},
};
use dispatch::Queue;
use display_link::DisplayLink;
use objc::{
    declare::ClassDecl,
    rc::autoreleasepool,
    runtime::{Object, Sel, BOOL, YES},
};
use std::{
    os::raw::c_void,
    sync::{Arc, Mutex, PoisonError},
};

const ESCAPE_KEY_CODE: u16 = 53;
const MANAGER_IVAR: &str = "applicationManager";

struct ApplicationManager<R: RendererDelgate + 'static> {
    renderer: MetalRenderer<R>,
}

unsafe impl<R: RendererDelgate + 'static> Send for ApplicationManager<R> {}

/// Recovers the manager stored on a view or window delegate.
///
/// # Safety
/// `this` must carry a [`MANAGER_IVAR`] set by [`ApplicationManager::attach`].
unsafe fn manager_of<R: RendererDelgate + 'static>(this: &Object) -> &mut ApplicationManager<R> {
    &mut *(*this.get_ivar::<*mut c_void>(MANAGER_IVAR) as *mut ApplicationManager<R>)
}

extern "C" fn accepts_first_responder(_: &Object, _: Sel) -> BOOL {
    YES
}

extern "C" fn on_key_down<R: RendererDelgate + 'static>(this: &Object, _: Sel, event: id) {
    unsafe {
        let key_code = NSEvent::keyCode(event);
        if key_code == ESCAPE_KEY_CODE {
            log::info!("Escape pressed, terminating");
            let () = msg_send![NSApp(), terminate: nil];
        } else {
            manager_of::<R>(this)
                .renderer
                .on_event(UserEvent::key_down(key_code));
        }
    }
}

/// Handles both resize and become-main; the notification's object is the window.
extern "C" fn on_window_resize<R: RendererDelgate + 'static>(this: &Object, _: Sel, notification: id) {
    unsafe {
        let nswindow: id = msg_send![notification, object];
        let NSSize { width, height } = nswindow.contentRectForFrameRect_(nswindow.frame()).size;
        manager_of::<R>(this)
            .renderer
            .update_size([width as Unit, height as Unit]);
    }
}

impl<R: RendererDelgate + 'static> ApplicationManager<R> {
    /// Must be called within `autoreleasepool()`.
    fn attach(nswindow: id, config: &AppConfig) -> Result<DisplayLink, AppError> {
        let scale = unsafe { nswindow.backingScaleFactor() as Unit };
        let mut manager = Box::new(Self {
            renderer: MetalRenderer::new(scale, config)?,
        });
        let manager_ptr = &mut *manager as *mut Self as *mut c_void;
        unsafe {
            #[allow(non_camel_case_types)]
            type id = cocoa::base::id; // `delegate!` expands to code naming `id`.
            nswindow.setDelegate_(delegate!("WindowDelegate", {
                applicationManager: *mut c_void = manager_ptr,
                (windowDidResize:) => on_window_resize::<R> as extern fn(&Object, Sel, id),
                (windowDidBecomeMain:) => on_window_resize::<R> as extern fn(&Object, Sel, id)
            }));
            let view = new_view::<R>()?;
            (*view).set_ivar(MANAGER_IVAR, manager_ptr);
            view.setWantsLayer(YES);
            view.setLayer(std::mem::transmute(manager.renderer.layer.as_ref()));
            nswindow.setContentView_(view);
            nswindow.setInitialFirstResponder_(view);
        }

        let manager = Arc::new(Mutex::new(manager));
        let main_queue = Queue::main();
        DisplayLink::new(move |_| {
            let manager = Arc::clone(&manager);
            main_queue.exec_async(move || {
                manager
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .renderer
                    .render()
            });
        })
        .ok_or(AppError::DisplayLink)
    }
}

/// Layer-hosting view that takes key focus and forwards key presses.
unsafe fn new_view<R: RendererDelgate + 'static>() -> Result<id, AppError> {
    const VIEW_CLASS: &str = "CustomNSView";
    let mut decl =
        ClassDecl::new(VIEW_CLASS, class!(NSView)).ok_or(AppError::ObjcClass(VIEW_CLASS))?;
    decl.add_method(
        sel!(acceptsFirstResponder),
        accepts_first_responder as extern "C" fn(&Object, Sel) -> BOOL,
    );
    decl.add_method(
        sel!(keyDown:),
        on_key_down::<R> as extern "C" fn(&Object, Sel, id),
    );
    decl.add_ivar::<*mut c_void>(MANAGER_IVAR);
    let class = decl.register();
    let view: id = msg_send![class, alloc];
    let view: id = msg_send![view, init];
    Ok(view)
}

unsafe fn ns_string(s: &str) -> id {
    NSString::alloc(nil).init_str(s).autorelease()
}

unsafe fn new_main_menu(app_name: &str) -> id {
    let quit = NSMenuItem::alloc(nil)
        .initWithTitle_action_keyEquivalent_(
            ns_string(&format!("Quit {app_name}")),
            selector("terminate:"),
            ns_string("q"),
        )
        .autorelease();
    let app_menu = NSMenu::new(nil).autorelease();
    app_menu.addItem_(quit);
    let app_menu_item = NSMenuItem::new(nil).autorelease();
    app_menu_item.setSubmenu_(app_menu);
    let menubar = NSMenu::new(nil).autorelease();
    menubar.addItem_(app_menu_item);
    menubar
}

unsafe fn new_window(title: &str, config: &AppConfig) -> id {
    let size = NSSize::new(config.width as _, config.height as _);
    let window = NSWindow::alloc(nil)
        .initWithContentRect_styleMask_backing_defer_(
            NSRect::new(NSPoint::new(0., 0.), size),
            NSWindowStyleMask::NSClosableWindowMask
                | NSWindowStyleMask::NSTitledWindowMask
                | NSWindowStyleMask::NSResizableWindowMask,
            NSBackingStoreBuffered,
            YES,
        )
        .autorelease();
    window.setPreservesContentDuringLiveResize_(false);
    window.setTitle_(ns_string(title));
    window.makeKeyAndOrderFront_(nil);
    window
}

/// Opens a window titled `app_name` and runs `R` until the application terminates.
pub fn launch_application<R: RendererDelgate + 'static>(
    app_name: &'static str,
    config: AppConfig,
) -> Result<(), AppError> {
    log::info!("Launching {app_name} with {config:?}");
    autoreleasepool(|| unsafe {
        let app = NSApp();
        app.setActivationPolicy_(NSApplicationActivationPolicyRegular);
        app.setMainMenu_(new_main_menu(app_name));
        let mut link = ApplicationManager::<R>::attach(new_window(app_name, &config), &config)?;
        app.activateIgnoringOtherApps_(true);
        link.resume().map_err(|_| AppError::DisplayLink)?;
        app.run();
        Ok(())
    })
}
