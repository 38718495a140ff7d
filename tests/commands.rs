mod common;

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use common::{send, session};
use libcli::cli::{Args, Command, Registry, Shell};
use libcli::list::{Link, List, Node, SpinLock};

/// A controllable device, kept in an intrusive list the `power` command owns.
struct Device {
    name: &'static str,
    value: AtomicI32,
    link: Link<Device>,
}

impl Device {
    const fn new(name: &'static str) -> Self {
        Self {
            name,
            value: AtomicI32::new(0),
            link: Link::new(),
        }
    }
}

impl Node for Device {
    fn link(&self) -> &Link<Self> {
        &self.link
    }
}

type Devices = List<'static, Device, SpinLock>;

static LASER: Device = Device::new("laser");
static PUMP: Device = Device::new("pump");
static DEVICES: Devices = List::new();

fn power(shell: &mut Shell<'_>, cmd: &Command, args: &mut Args<'_>) {
    let Some(devices) = cmd.context::<Devices>() else {
        return;
    };
    let eol = shell.eol();

    let Some(target) = args.next() else {
        return;
    };

    if target == "?" {
        devices.visit(|dev| shell.print(format_args!("{}{}", dev.name, eol)));
        return;
    }

    let Some(dev) = devices.find(|dev| dev.name == target) else {
        shell.not_found(target);
        return;
    };

    match args.next() {
        Some("?") => {
            let value = dev.value.load(Ordering::Relaxed);
            shell.print(format_args!("{}{}", value, eol));
        }
        Some(value) => match value.parse::<i32>() {
            Ok(value) => {
                dev.value.store(value, Ordering::Relaxed);
                shell.print(format_args!("ok{}", eol));
            }
            Err(_) => shell.print(format_args!("error{}", eol)),
        },
        None => {}
    }
}

static LED_ON: AtomicBool = AtomicBool::new(false);

fn led(shell: &mut Shell<'_>, cmd: &Command, args: &mut Args<'_>) {
    shell.dispatch_subcommand(cmd, args);
}

fn led_on(shell: &mut Shell<'_>, _cmd: &Command, _args: &mut Args<'_>) {
    LED_ON.store(true, Ordering::Relaxed);
    let eol = shell.eol();
    shell.print(format_args!("led is on{}", eol));
}

fn led_off(shell: &mut Shell<'_>, _cmd: &Command, _args: &mut Args<'_>) {
    LED_ON.store(false, Ordering::Relaxed);
    let eol = shell.eol();
    shell.print(format_args!("led is off{}", eol));
}

static LED_COMMANDS: [Command; 2] = [
    Command::new("on", "switch the led on", led_on),
    Command::new("off", "switch the led off", led_off),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_devices() {
        DEVICES.push(&LASER).unwrap();
        DEVICES.push(&PUMP).unwrap();

        let a0 = Command::new("power", "power <device> <value>|?\npower ?", power)
            .with_context(&DEVICES);
        let registry: Registry = Registry::new();
        let mut cli = session::<64>(&registry);
        cli.register(&a0).unwrap();
        cli.output_mut().take();

        assert_eq!(send(&mut cli, "power ?\r\n"), "power ?\r\npump\r\nlaser\r\n> ");
        assert_eq!(send(&mut cli, "power laser ?\r\n"), "power laser ?\r\n0\r\n> ");
        assert_eq!(send(&mut cli, "power laser 1\r\n"), "power laser 1\r\nok\r\n> ");
        assert_eq!(send(&mut cli, "power laser ?\r\n"), "power laser ?\r\n1\r\n> ");
        assert_eq!(send(&mut cli, "power laser on\r\n"), "power laser on\r\nerror\r\n> ");
        assert_eq!(send(&mut cli, "power fan 1\r\n"), "power fan 1\r\n'fan' not found\r\n> ");
        assert_eq!(LASER.value.load(Ordering::Relaxed), 1);
        assert_eq!(PUMP.value.load(Ordering::Relaxed), 0);

        cli.close();
        assert_eq!(DEVICES.clear(), 2);
        assert!(!LASER.link.is_linked());
    }

    #[test]
    fn test_subcommand_dispatch() {
        let a0 = Command::new("led", "led on|off", led).with_subcommands(&LED_COMMANDS);
        let registry: Registry = Registry::new();
        let mut cli = session::<64>(&registry);
        cli.register(&a0).unwrap();
        cli.output_mut().take();

        assert_eq!(send(&mut cli, "led on\r\n"), "led on\r\nled is on\r\n> ");
        assert!(LED_ON.load(Ordering::Relaxed));

        assert_eq!(send(&mut cli, "led  off\r\n"), "led  off\r\nled is off\r\n> ");
        assert!(!LED_ON.load(Ordering::Relaxed));

        assert_eq!(
            send(&mut cli, "led\r\n"),
            "led\r\non : switch the led on\r\noff : switch the led off\r\n> "
        );
        assert_eq!(send(&mut cli, "led blink\r\n"), "led blink\r\n'blink' not found\r\n> ");
    }

    #[test]
    fn test_handler_invokes_other_command() {
        fn alias(shell: &mut Shell<'_>, _cmd: &Command, args: &mut Args<'_>) {
            if let Some(target) = shell.find("led") {
                shell.invoke(target, args);
            }
        }

        let a0 = Command::new("led", "led on|off", led).with_subcommands(&LED_COMMANDS);
        let a1 = Command::new("l", "alias for led", alias);
        let registry: Registry = Registry::new();
        let mut cli = session::<64>(&registry);
        cli.register(&a0).unwrap();
        cli.register(&a1).unwrap();
        cli.output_mut().take();

        assert_eq!(
            send(&mut cli, "l\n"),
            "l\non : switch the led on\r\noff : switch the led off\r\n> "
        );
        assert_eq!(send(&mut cli, "l dim\n"), "l dim\n'dim' not found\r\n> ");
    }
}
