//! # Flash store
//! Persists the alarm schedule in the on-board flash, one `sequential-storage` map item per
//! address. A RAM mirror answers reads, writes go to the mirror and to flash.
use core::ops::Range;
use defmt::{Debug2Format, info, warn};
use embassy_futures::block_on;
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use sequential_storage::cache::NoCache;
use sequential_storage::map::{fetch_item, store_item};
use sunrise_alarmclock::ByteStore;
use sunrise_alarmclock::alarm_settings::ADDRESS_COUNT;

/// Size of the flash on the Pico
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Flash region of the map, three sectors right below the end of the flash
const FLASH_RANGE: Range<u32> = 0x1F_9000..0x1F_C000;

/// The alarm schedule in flash
pub struct FlashByteStore {
    /// The flash peripheral
    flash: Flash<'static, FLASH, Async, FLASH_SIZE>,
    /// Scratch buffer of `sequential-storage`
    data_buffer: [u8; 32],
    /// What is stored in flash
    mirror: [u8; ADDRESS_COUNT],
}

impl FlashByteStore {
    /// Create a new `FlashByteStore` and load the schedule. Addresses that were never written
    /// read as 0.
    pub fn new(flash: Flash<'static, FLASH, Async, FLASH_SIZE>) -> Self {
        let mut store = Self {
            flash,
            data_buffer: [0; 32],
            mirror: [0; ADDRESS_COUNT],
        };
        for address in 0..ADDRESS_COUNT {
            let Ok(key) = u8::try_from(address) else {
                continue;
            };
            store.mirror[address] = store.fetch(key);
        }
        info!("Loaded alarm schedule: {}", store.mirror);
        store
    }

    /// Reads one address from flash
    fn fetch(&mut self, key: u8) -> u8 {
        let item: Result<Option<u8>, _> = block_on(fetch_item(
            &mut self.flash,
            FLASH_RANGE,
            &mut NoCache::new(),
            &mut self.data_buffer,
            &key,
        ));
        match item {
            Ok(value) => value.unwrap_or(0),
            Err(e) => {
                warn!("Could not read address {}: {:?}", key, Debug2Format(&e));
                0
            }
        }
    }
}

impl ByteStore for FlashByteStore {
    fn read(&mut self, address: u8) -> u8 {
        self.mirror.read(address)
    }

    fn write(&mut self, address: u8, value: u8) {
        self.mirror.write(address, value);
        let stored = block_on(store_item(
            &mut self.flash,
            FLASH_RANGE,
            &mut NoCache::new(),
            &mut self.data_buffer,
            &address,
            &value,
        ));
        if let Err(e) = stored {
            warn!("Could not write address {}: {:?}", address, Debug2Format(&e));
        }
    }
}
